use serde::{Deserialize, Serialize};

use crate::error::{PresentError, Result};
use crate::format::{FormatStyle, MAX_DECIMALS};

fn default_debounce_ms() -> f64 {
    300.0
}

fn default_decimals() -> u32 {
    1
}

/// Card configuration as the dashboard stores it.
///
/// Layout keys the card carries for the TypeScript side are ignored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    pub entity: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Hard-coded icon in any accepted spelling.
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub format: FormatStyle,
    #[serde(default)]
    pub details: Vec<DetailConfig>,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: f64,
}

/// A secondary numeric reading shown under the main state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailConfig {
    pub attribute: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

impl CardConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.entity.contains('.') {
            return Err(PresentError::Config(format!(
                "entity must look like <domain>.<object_id>, got {:?}",
                self.entity
            )));
        }
        if !self.debounce_ms.is_finite() || self.debounce_ms < 0.0 {
            return Err(PresentError::Config(format!(
                "debounce_ms must be a non-negative number, got {}",
                self.debounce_ms
            )));
        }
        if let Some(detail) = self.details.iter().find(|d| d.decimals > MAX_DECIMALS) {
            return Err(PresentError::Config(format!(
                "details.{}: decimals must be at most {MAX_DECIMALS}, got {}",
                detail.attribute, detail.decimals
            )));
        }
        Ok(())
    }
}

impl DetailConfig {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.attribute)
    }
}
