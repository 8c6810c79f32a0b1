use serde_json::Value;

use crate::config::CardConfig;
use crate::entity::EntityView;
use crate::error::{PresentError, Result};
use crate::format::{self, ValueHint};
use crate::icons;
use crate::render::RenderSpec;

/// Turns hub entities into render specs for one configured card.
///
/// Holds no entity state: the store owns entities, and the card calls
/// [`CardPresenter::present`] again whenever its entity changes.
pub struct CardPresenter {
    config: CardConfig,
    /// The config icon, normalized once.
    icon: Option<String>,
}

impl CardPresenter {
    pub fn new(config: CardConfig) -> Self {
        let icon = config
            .icon
            .as_deref()
            .map(|icon| icons::normalize_icon(icon).into_owned())
            .filter(|icon| !icon.is_empty());
        Self { config, icon }
    }

    pub fn from_json(config_json: &str) -> Result<Self> {
        Ok(Self::new(CardConfig::from_json(config_json)?))
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Render the configured entity. `None` means the store has no such
    /// entity yet.
    pub fn present(&self, entity: Option<&Value>) -> RenderSpec {
        let Some(entity) = entity.filter(|v| !v.is_null()) else {
            return RenderSpec::error(format!("Entity not available: {}", self.config.entity));
        };
        match self.try_present(entity) {
            Ok(spec) => spec,
            Err(e) => {
                tracing::warn!(entity_id = %self.config.entity, error = %e, "cannot present entity");
                RenderSpec::error(e.to_string())
            }
        }
    }

    /// [`CardPresenter::present`] for an entity in its JSON wire form.
    pub fn present_json(&self, entity_json: &str) -> RenderSpec {
        match serde_json::from_str::<Value>(entity_json) {
            Ok(value) => self.present(Some(&value)),
            Err(e) => {
                let e = PresentError::from(e);
                tracing::warn!(entity_id = %self.config.entity, error = %e, "cannot present entity");
                RenderSpec::error(e.to_string())
            }
        }
    }

    fn try_present(&self, entity: &Value) -> Result<RenderSpec> {
        let view = EntityView::new(entity)?;
        let entity_id = self.config.entity.as_str();
        if let Some(own_id) = view.entity_id()?
            && own_id != entity_id
        {
            return Err(PresentError::MalformedEntity(format!(
                "card is for {entity_id}, got {own_id}"
            )));
        }

        let icon = match &self.icon {
            Some(icon) => Some(icon.clone()),
            None => icons::resolve_icon_class(Some(entity), Some(entity_id)),
        };

        let name = self
            .config
            .name
            .as_deref()
            .or_else(|| view.friendly_name())
            .unwrap_or(entity_id);

        let unit = view.unit().unwrap_or_else(|e| {
            tracing::warn!(entity_id, error = %e, "ignoring unit of measurement");
            ""
        });
        let hint = ValueHint {
            unit: Some(unit).filter(|u| !u.is_empty()),
            device_class: view.device_class(),
        };
        let raw_state = view.state().unwrap_or_else(|| "unknown".to_string());
        let state = format::format_state(&raw_state, &hint, self.config.format);

        let details = self
            .config
            .details
            .iter()
            .map(|detail| {
                (
                    detail.label().to_string(),
                    format::format_attribute(view.attributes(), &detail.attribute, detail.decimals),
                )
            })
            .collect();

        Ok(RenderSpec::entity(
            entity_id,
            name,
            icon,
            state,
            hint.unit.map(str::to_string),
            details,
        ))
    }
}
