//! Capabilities are the only way the core reaches the outside world. Each one
//! describes an operation for the shell; the shell executes it and (for
//! request-style capabilities) resolves the result back into an event.

pub mod http;
pub mod telemetry;

use crux_core::render::Render;
use crux_macros::Effect as EffectDerive;

use crate::app::App;
use crate::event::Event;

pub use http::{
    Http, HttpError, HttpMethod, HttpOperation, HttpRequest, HttpResponse, HttpResult,
    ValidatedUrl,
};
pub use telemetry::{Telemetry, TelemetryOperation};

pub type AppHttp = Http<Event>;
pub type AppRender = Render<Event>;
pub type AppTelemetry = Telemetry<Event>;

#[derive(EffectDerive)]
#[effect(app = "App")]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
    pub telemetry: Telemetry<Event>,
}

impl Capabilities {
    #[must_use]
    pub fn http(&self) -> &AppHttp {
        &self.http
    }

    #[must_use]
    pub fn render(&self) -> &AppRender {
        &self.render
    }

    #[must_use]
    pub fn telemetry(&self) -> &AppTelemetry {
        &self.telemetry
    }
}
