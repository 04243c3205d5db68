use serde::{Deserialize, Serialize};

use crate::scheme::{SchemeId, UnknownSchemeError};
use crate::session::DEFAULT_BATCH_CREDITS;

/// Scheme preselected when the user has not configured one.
pub const DEFAULT_SCHEME: SchemeId = SchemeId::Nwu;

/// User configuration.
///
/// Example YAML:
/// ```yaml
/// default_scheme: "BRAC/NSU"
/// batches: [3, 1.5, 0.75]
/// color: auto
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scheme used when none is given on the command line (default: NWU)
    #[serde(default)]
    pub default_scheme: Option<String>,

    /// Credit values offered by the bulk-entry form (default: 3, 1.5, 0.75)
    #[serde(default)]
    pub batches: Option<Vec<f64>>,

    #[serde(default)]
    pub color: Option<ColorMode>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl Config {
    pub fn scheme(&self) -> Result<SchemeId, UnknownSchemeError> {
        match &self.default_scheme {
            Some(name) => name.parse(),
            None => Ok(DEFAULT_SCHEME),
        }
    }

    pub fn batch_credits(&self) -> Vec<f64> {
        self.batches
            .clone()
            .unwrap_or_else(|| DEFAULT_BATCH_CREDITS.to_vec())
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.unwrap_or_default()
    }
}
