//! Telemetry capability.
//!
//! Fire-and-forget structured events. The shell decides what to do with them
//! (log, forward, drop); the core never waits for an answer and never changes
//! behavior based on telemetry.

use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TelemetryOperation {
    Event {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Counter {
        name: String,
        value: u64,
    },
    Warn {
        name: String,
        detail: String,
    },
    Error {
        name: String,
        detail: String,
    },
}

impl Operation for TelemetryOperation {
    type Output = ();
}

pub struct Telemetry<Ev> {
    context: CapabilityContext<TelemetryOperation, Ev>,
}

impl<Ev> Capability<Ev> for Telemetry<Ev> {
    type Operation = TelemetryOperation;
    type MappedSelf<MappedEv> = Telemetry<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Telemetry::new(self.context.map_event(f))
    }
}

impl<Ev> Telemetry<Ev>
where
    Ev: 'static,
{
    #[must_use]
    pub fn new(context: CapabilityContext<TelemetryOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn event(&self, name: &str, attributes: &[(&str, &str)]) {
        self.emit(TelemetryOperation::Event {
            name: name.into(),
            attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        });
    }

    pub fn counter(&self, name: &str, value: u64) {
        self.emit(TelemetryOperation::Counter {
            name: name.into(),
            value,
        });
    }

    pub fn warn(&self, name: &str, detail: &str) {
        self.emit(TelemetryOperation::Warn {
            name: name.into(),
            detail: detail.into(),
        });
    }

    pub fn error(&self, name: &str, detail: &str) {
        self.emit(TelemetryOperation::Error {
            name: name.into(),
            detail: detail.into(),
        });
    }

    fn emit(&self, operation: TelemetryOperation) {
        let context = self.context.clone();
        self.context.spawn(async move {
            context.notify_shell(operation).await;
        });
    }
}
