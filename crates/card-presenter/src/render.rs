use serde::{Deserialize, Serialize};

/// A render spec is the output of the presenter.
/// TypeScript receives this as JSON and renders it to DOM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderSpec {
    /// An entity card: icon, name, formatted state.
    #[serde(rename = "entity")]
    Entity {
        entity_id: String,
        name: String,
        /// `mdi mdi-<name>`, or `None` when the card shows no icon.
        icon: Option<String>,
        state: String,
        unit: Option<String>,
        /// Secondary readings as (label, formatted value).
        details: Vec<(String, String)>,
    },

    /// The card cannot render; shown in place of the card body.
    #[serde(rename = "error")]
    Error { message: String },
}

impl RenderSpec {
    pub fn entity(
        entity_id: impl Into<String>,
        name: impl Into<String>,
        icon: Option<String>,
        state: impl Into<String>,
        unit: Option<String>,
        details: Vec<(String, String)>,
    ) -> Self {
        Self::Entity {
            entity_id: entity_id.into(),
            name: name.into(),
            icon,
            state: state.into(),
            unit,
            details,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Serialize for the TypeScript side. Falls back to an error spec if the
    /// spec itself cannot be encoded.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!(error = %e, "render spec serialization failed");
            format!(
                r#"{{"type":"error","message":{}}}"#,
                serde_json::Value::String(format!("Serialization error: {e}"))
            )
        })
    }
}
