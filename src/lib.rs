#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod capabilities;
pub mod catalog;
pub mod event;
pub mod model;
pub mod skip;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use app::{App, SkipCardView, UserFacingError, ViewModel};
pub use capabilities::{Capabilities, Effect};
pub use event::Event;
pub use model::{AppConfig, Model, Screen, SkipId};
pub use skip::Skip;

pub use crux_core::App as CruxApp;

pub const DEFAULT_API_BASE: &str = "https://app.wewantwaste.co.uk";
pub const SKIPS_BY_LOCATION_PATH: &str = "/api/skips/by-location";
pub const FETCH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_POSTCODE: &str = "NR32";
pub const DEFAULT_AREA: &str = "Lowestoft";
pub const DEFAULT_HIRE_PERIOD: &str = "14 day hire period";

/// How a skips fetch failed. Every variant maps to a user-readable message;
/// none of them is fatal to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FetchErrorKind {
    /// 200 response that yielded zero usable items (or an undecodable body).
    EmptyResult,
    /// A response arrived with a status other than 200.
    ApiStatus(u16),
    /// The transport failed before a status was obtained (DNS, connect,
    /// reset, timeout, cancellation).
    Network,
    /// Request construction failed, or anything else went wrong.
    Unexpected,
}

impl FetchErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyResult => "EMPTY_RESULT",
            Self::ApiStatus(_) => "API_STATUS",
            Self::Network => "NETWORK_ERROR",
            Self::Unexpected => "UNEXPECTED_ERROR",
        }
    }

    #[must_use]
    pub const fn is_retryable(self) -> bool {
        match self {
            Self::Network | Self::EmptyResult => true,
            Self::ApiStatus(status) => status >= 500,
            Self::Unexpected => false,
        }
    }
}

/// A classified fetch failure. `message` is what the shell shows next to the
/// fallback list; `detail` is for telemetry only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
    pub detail: Option<String>,
}

impl FetchError {
    #[must_use]
    pub fn empty_result() -> Self {
        Self {
            kind: FetchErrorKind::EmptyResult,
            message: "No skip data available".into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn api_status(status: u16) -> Self {
        Self {
            kind: FetchErrorKind::ApiStatus(status),
            message: format!("API request failed with status: {status}"),
            detail: None,
        }
    }

    #[must_use]
    pub fn network(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            kind: FetchErrorKind::Network,
            message: format!("Network error: {detail}"),
            detail: Some(detail),
        }
    }

    #[must_use]
    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Unexpected,
            message: "An unexpected error occurred".into(),
            detail: Some(detail.into()),
        }
    }

    #[must_use]
    pub fn from_http_error(error: &capabilities::HttpError) -> Self {
        use capabilities::HttpError;
        match error {
            HttpError::Timeout { .. }
            | HttpError::Dns { .. }
            | HttpError::Connect { .. }
            | HttpError::Cancelled { .. } => Self::network(error.to_string()),
            _ => Self::unexpected(error.to_string()),
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, " (detail: {detail})")?;
        }
        Ok(())
    }
}

impl std::error::Error for FetchError {}
