use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Key under which the engine reads its layout tunables.
pub const LAYOUT_KEY: &str = "layout";

/// Host-supplied engine configuration as a JSON object.
///
/// Layout tunables live under the `layout` key (see [`LayoutOptions::from_config`]); anything else
/// is ignored by the engine and may be used by the host for its own settings.
///
/// [`LayoutOptions::from_config`]: crate::LayoutOptions::from_config
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig(Value);

impl Default for EngineConfig {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl EngineConfig {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(text)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The `layout` section, or `None` when the host set no layout keys.
    ///
    /// A present section that is not a JSON object is rejected rather than ignored.
    pub fn layout(&self) -> Result<Option<&Value>> {
        let Some(section) = self.0.as_object().and_then(|root| root.get(LAYOUT_KEY)) else {
            return Ok(None);
        };
        if section.is_null() {
            return Ok(None);
        }
        if !section.is_object() {
            return Err(Error::InvalidConfig {
                key: LAYOUT_KEY.to_string(),
                message: format!("expected an object, got {section}"),
            });
        }
        Ok(Some(section))
    }
}
