use serde_json::{Map, Value};

const TENTHS_SUFFIX: &str = "Temp";

/// Current readings of a device, keyed by value name.
///
/// Temperatures (names ending in `Temp`) are reported in tenths of a degree and are
/// normalized to degrees on read.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceState {
    data: Value,
}

impl DeviceState {
    pub fn new(data: Value) -> Self {
        DeviceState { data }
    }

    pub fn value(&self, name: &str) -> Option<Value> {
        self.raw_values()?.get(name).map(|value| normalize(name, value))
    }

    /// Reading as a float, if it is numeric.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.value(name)?.as_f64()
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, Value)> {
        self.raw_values()
            .into_iter()
            .flat_map(|values| values.iter())
            .map(|(name, value)| (name.as_str(), normalize(name, value)))
    }

    pub fn raw(&self) -> &Value {
        &self.data
    }

    fn raw_values(&self) -> Option<&Map<String, Value>> {
        self.data.get("values")?.as_object()
    }
}

fn normalize(name: &str, value: &Value) -> Value {
    if !name.ends_with(TENTHS_SUFFIX) {
        return value.clone();
    }

    match value.as_f64() {
        Some(tenths) => Value::from(tenths / 10.0),
        None => value.clone(),
    }
}

impl From<Value> for DeviceState {
    fn from(data: Value) -> Self {
        DeviceState::new(data)
    }
}
