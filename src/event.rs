use serde::{Deserialize, Serialize};

use crate::capabilities::HttpResult;
use crate::model::SkipId;

/// Everything that can happen to the core: user intents from the shell plus
/// the completion of fetches the core itself started.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Event {
    /// The shell asks for skips matching a postcode and area. Also used on
    /// startup with the default pair.
    SkipsRequested { postcode: String, area: String },

    /// A fetch started by `SkipsRequested` completed. Carries the generation
    /// counter captured when the request was issued, so outcomes from a
    /// superseded input pair can be dropped.
    SkipsFetched {
        generation: u64,
        result: Box<HttpResult>,
    },

    SkipSelected { id: SkipId },
    ContinuePressed,
    BackPressed,
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SkipsRequested { .. } => "skips_requested",
            Self::SkipsFetched { .. } => "skips_fetched",
            Self::SkipSelected { .. } => "skip_selected",
            Self::ContinuePressed => "continue_pressed",
            Self::BackPressed => "back_pressed",
        }
    }

    /// Whether the event originates from a user action, as opposed to an
    /// internal completion.
    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        !matches!(self, Self::SkipsFetched { .. })
    }
}
