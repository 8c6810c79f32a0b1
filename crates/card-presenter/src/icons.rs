//! Material Design Icon classes for hub entities.
//!
//! Icons render as CSS classes of the form `mdi mdi-<name>`. Entities name
//! their icons in several spellings (`mdi:home`, `mdi-home`, `home`), so
//! [`normalize_icon`] folds them into one, and [`resolve_icon_class`] picks
//! an icon for entities that do not bring one.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::entity::{EntityView, domain_of};
use crate::error::Result;

const CLASS_PREFIX: &str = "mdi mdi-";

static CANONICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^mdi\s+mdi-").expect("static pattern"));

/// Fold an icon name into the canonical `mdi mdi-<name>` class.
///
/// Already-canonical input is returned untouched, including its whitespace
/// run. The empty string stays empty.
pub fn normalize_icon(icon: &str) -> Cow<'_, str> {
    if icon.is_empty() || CANONICAL.is_match(icon) {
        return Cow::Borrowed(icon);
    }
    if let Some(("mdi", rest)) = icon.split_once(':') {
        return Cow::Owned(format!("{CLASS_PREFIX}{rest}"));
    }
    if icon.starts_with("mdi-") {
        return Cow::Owned(format!("mdi {icon}"));
    }
    Cow::Owned(format!("{CLASS_PREFIX}{icon}"))
}

/// [`normalize_icon`] over arbitrary JSON. Only strings are rewritten;
/// `null` and every other value pass through as-is.
pub fn normalize_icon_value(icon: &Value) -> Value {
    match icon {
        Value::String(s) => Value::String(normalize_icon(s).into_owned()),
        other => other.clone(),
    }
}

/// One unit-of-measurement rule: a case-insensitive pattern and the icon
/// class it selects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitIconRule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub icon: &'static str,
}

/// Unit rules in priority order. First match wins.
///
/// `ruler` sits ahead of `speedometer` and its bare-`m` alternative also
/// matches `rpm`, so only units like `speed` reach the last rule.
pub const UNIT_ICON_RULES: &[UnitIconRule] = &[
    UnitIconRule {
        name: "temperature",
        pattern: r"°",
        icon: "mdi mdi-thermometer",
    },
    UnitIconRule {
        name: "percentage",
        pattern: r"%|percent",
        icon: "mdi mdi-percent",
    },
    UnitIconRule {
        name: "power",
        pattern: r"kw|w(?:(?-i:[^0-9A-Za-z_])|$)|watt|power",
        icon: "mdi mdi-lightning-bolt",
    },
    UnitIconRule {
        name: "voltage",
        pattern: r"v$|volt|voltage",
        icon: "mdi mdi-flash",
    },
    UnitIconRule {
        name: "current",
        pattern: r"a$|amp|ampere|current",
        icon: "mdi mdi-current-ac",
    },
    UnitIconRule {
        name: "frequency",
        pattern: r"hz|frequency",
        icon: "mdi mdi-sine-wave",
    },
    UnitIconRule {
        name: "volume",
        pattern: r"m³|m3|l|liter|gallon",
        icon: "mdi mdi-water",
    },
    UnitIconRule {
        name: "distance",
        pattern: r"km|m(?:(?-i:[^dD])|$)|mile|distance|length",
        icon: "mdi mdi-ruler",
    },
    UnitIconRule {
        name: "sound",
        pattern: r"db|sound|noise|level",
        icon: "mdi mdi-volume-high",
    },
    UnitIconRule {
        name: "speed",
        pattern: r"rpm|speed",
        icon: "mdi mdi-speedometer",
    },
];

static UNIT_MATCHERS: LazyLock<Vec<(&'static UnitIconRule, Regex)>> = LazyLock::new(|| {
    UNIT_ICON_RULES
        .iter()
        .filter_map(|rule| match Regex::new(&format!("(?i){}", rule.pattern)) {
            Ok(re) => Some((rule, re)),
            Err(e) => {
                tracing::error!(rule = rule.name, error = %e, "unit icon rule failed to compile");
                None
            }
        })
        .collect()
});

/// The first unit rule matching `unit`, if any.
pub fn unit_rule(unit: &str) -> Option<&'static UnitIconRule> {
    if unit.is_empty() {
        return None;
    }
    UNIT_MATCHERS
        .iter()
        .find(|(_, re)| re.is_match(unit))
        .map(|(rule, _)| *rule)
}

/// Icon class inferred from a unit of measurement.
pub fn unit_icon(unit: &str) -> Option<&'static str> {
    unit_rule(unit).map(|rule| rule.icon)
}

/// Icon class for an entity domain.
pub fn domain_icon(domain: &str) -> Option<&'static str> {
    let icon = match domain {
        "sensor" => "mdi mdi-gauge",
        "binary_sensor" => "mdi mdi-eye",
        "switch" => "mdi mdi-toggle-switch",
        "light" => "mdi mdi-lightbulb",
        "climate" => "mdi mdi-thermostat",
        "fan" => "mdi mdi-fan",
        "media_player" => "mdi mdi-speaker",
        "vacuum" => "mdi mdi-robot-vacuum",
        "lock" => "mdi mdi-lock",
        "alarm_control_panel" => "mdi mdi-shield-home",
        "camera" => "mdi mdi-camera",
        "device_tracker" => "mdi mdi-map-marker",
        "person" => "mdi mdi-account",
        "zone" => "mdi mdi-map-marker-radius",
        _ => return None,
    };
    Some(icon)
}

/// Pick the icon class for an entity whose card has no hard-coded icon.
///
/// Priority: an explicit `mdi:`-prefixed `icon` attribute, then the unit of
/// measurement, then the domain of `entity_id` (or of the entity's own id
/// when `entity_id` is `None`). Returns `None` when nothing applies.
/// Malformed input is logged and also yields `None`.
pub fn resolve_icon_class(entity: Option<&Value>, entity_id: Option<&str>) -> Option<String> {
    let entity = entity.filter(|v| !is_falsy(v))?;
    match try_resolve(entity, entity_id) {
        Ok(icon) => icon,
        Err(e) => {
            tracing::warn!(entity_id, error = %e, "icon resolution failed");
            None
        }
    }
}

/// [`resolve_icon_class`] for an entity still in its JSON wire form.
pub fn resolve_icon_class_json(entity_json: &str, entity_id: Option<&str>) -> Option<String> {
    match serde_json::from_str::<Value>(entity_json) {
        Ok(value) => resolve_icon_class(Some(&value), entity_id),
        Err(e) => {
            tracing::warn!(entity_id, error = %e, "icon resolution failed: entity is not JSON");
            None
        }
    }
}

fn try_resolve(entity: &Value, entity_id: Option<&str>) -> Result<Option<String>> {
    let view = EntityView::new(entity)?;

    // Non-`mdi:` explicit icons deliberately fall through to inference.
    if let Some(rest) = view
        .str_attribute("icon")
        .and_then(|icon| icon.strip_prefix("mdi:"))
    {
        return Ok(Some(format!("{CLASS_PREFIX}{rest}")));
    }

    if let Some(rule) = unit_rule(view.unit()?) {
        tracing::debug!(rule = rule.name, "icon inferred from unit");
        return Ok(Some(rule.icon.to_string()));
    }

    let id = match entity_id {
        Some(id) => Some(id),
        None => view.entity_id()?,
    };
    Ok(id
        .map(domain_of)
        .and_then(domain_icon)
        .map(str::to_string))
}

fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}
