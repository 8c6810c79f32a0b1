use serde_json::{Map, Value};

use crate::error::{PresentError, Result};

/// A borrowed, read-only view over a hub entity record.
///
/// Entities arrive as whatever JSON the hub sent, so every accessor is
/// tolerant: missing keys read as `None`, and only shapes that cannot be an
/// entity at all are reported as errors.
#[derive(Debug, Clone, Copy)]
pub struct EntityView<'a> {
    value: &'a Value,
    attributes: Option<&'a Map<String, Value>>,
}

impl<'a> EntityView<'a> {
    /// Wrap a JSON value. Fails if the value is not an object or its
    /// `attributes` is present but not an object.
    pub fn new(value: &'a Value) -> Result<Self> {
        if !value.is_object() {
            return Err(PresentError::MalformedEntity(format!(
                "expected an object, got {}",
                json_kind(value)
            )));
        }
        let attributes = match value.get("attributes") {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(other) => {
                return Err(PresentError::MalformedEntity(format!(
                    "attributes must be an object, got {}",
                    json_kind(other)
                )));
            }
        };
        Ok(Self { value, attributes })
    }

    /// The entity's own `entity_id`, if present.
    pub fn entity_id(&self) -> Result<Option<&'a str>> {
        match self.value.get("entity_id") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(PresentError::MalformedEntity(format!(
                "entity_id must be a string, got {}",
                json_kind(other)
            ))),
        }
    }

    /// The raw state. Hubs always send strings, but numbers are tolerated.
    pub fn state(&self) -> Option<String> {
        match self.value.get("state")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&'a Value> {
        self.attributes.and_then(|attrs| attrs.get(key))
    }

    /// A string attribute. Non-string values read as `None`.
    pub fn str_attribute(&self, key: &str) -> Option<&'a str> {
        self.attribute(key).and_then(|v| v.as_str())
    }

    pub fn attributes(&self) -> Option<&'a Map<String, Value>> {
        self.attributes
    }

    /// `attributes.unit_of_measurement`; an empty string when absent.
    pub fn unit(&self) -> Result<&'a str> {
        match self.attribute("unit_of_measurement") {
            None | Some(Value::Null) => Ok(""),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(PresentError::MalformedEntity(format!(
                "unit_of_measurement must be a string, got {}",
                json_kind(other)
            ))),
        }
    }

    pub fn friendly_name(&self) -> Option<&'a str> {
        self.str_attribute("friendly_name")
    }

    pub fn device_class(&self) -> Option<&'a str> {
        self.str_attribute("device_class")
    }
}

/// The domain of an entity id: everything before the first `.`.
pub fn domain_of(entity_id: &str) -> &str {
    entity_id.split('.').next().unwrap_or("")
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
