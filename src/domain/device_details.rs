use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Device description including notifications, orders, properties and errors.
///
/// `properties` is indexed by name once on construction. When a name occurs more than once
/// the last record wins.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceDetails {
    data: Value,
    properties: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct PropertyRecord {
    name: Option<String>,
    #[serde(default)]
    value: Value,
}

impl DeviceDetails {
    pub fn new(data: Value) -> Self {
        let records = data
            .get("properties")
            .and_then(Value::as_array)
            .map(|records| records.as_slice())
            .unwrap_or_default();

        let properties = records
            .iter()
            .filter_map(|record| PropertyRecord::deserialize(record).ok())
            .filter_map(|record| record.name.map(|name| (name, record.value)))
            .collect();

        DeviceDetails { data, properties }
    }

    /// Top-level field of the details document.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> &HashMap<String, Value> {
        &self.properties
    }

    pub fn raw(&self) -> &Value {
        &self.data
    }
}

impl From<Value> for DeviceDetails {
    fn from(data: Value) -> Self {
        DeviceDetails::new(data)
    }
}
