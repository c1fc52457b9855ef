use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ResolverError;
use super::merge::merge_configurations;

/// Field naming the page strategy directory a device uses.
pub const PAGE_STRATEGY_FIELD: &str = "pageStrategy";

/// One device's configuration document, kept as loosely-typed JSON.
/// Only `pageStrategy` has a known shape; everything else varies by device class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceConfiguration(Value);

impl DeviceConfiguration {
    /// The page strategy name, if the document has one as a string.
    pub fn page_strategy(&self) -> Option<&str> {
        self.0.get(PAGE_STRATEGY_FIELD).and_then(|v| v.as_str())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Returns this configuration with `patch` overlaid on top of it.
    pub fn merged_with(self, patch: DeviceConfiguration) -> Result<Self, ResolverError> {
        merge_configurations(self.0, patch.0).map(Self)
    }
}

impl From<Value> for DeviceConfiguration {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
