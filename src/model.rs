use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog;
use crate::skip::Skip;
use crate::{FetchError, DEFAULT_API_BASE, FETCH_TIMEOUT_MS};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct SkipId(pub String);

impl SkipId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which screen of the flow the user is on. An enum rather than a boolean so
/// the documented later steps (date, payment) slot in without a redesign.
#[derive(Default, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Selecting,
    Confirming,
}

/// Core configuration. The shell may override the endpoint (e.g. to point a
/// dev build at a proxy); everything defaults to production values.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: String,
    pub fetch_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Model {
    pub config: AppConfig,

    // Current input pair
    pub postcode: String,
    pub area: String,

    // Acquisition result, recomputed per fetch cycle
    pub skips: Vec<Skip>,
    pub is_loading: bool,
    pub fetch_error: Option<FetchError>,
    pub resolved_location: String,
    pub resolved_postcode: String,

    /// Bumped on every new input pair; a fetch outcome is only applied when
    /// its generation still matches (stale-response suppression).
    pub fetch_generation: u64,

    // Selection state
    pub selected_skip_id: Option<SkipId>,
    pub screen: Screen,
}

impl Model {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The list actually shown: remote items when we have them, otherwise the
    /// static catalog. Derived on every call, never cached.
    #[must_use]
    pub fn display_skips(&self) -> &[Skip] {
        if self.skips.is_empty() {
            catalog::fallback_skips()
        } else {
            &self.skips
        }
    }

    #[must_use]
    pub fn using_fallback(&self) -> bool {
        self.skips.is_empty()
    }

    /// The selected item resolved against the current display list, or `None`
    /// when nothing is selected or the id is no longer displayed.
    #[must_use]
    pub fn selected_skip(&self) -> Option<&Skip> {
        let id = self.selected_skip_id.as_ref()?;
        self.display_skips().iter().find(|skip| &skip.id == id)
    }
}
