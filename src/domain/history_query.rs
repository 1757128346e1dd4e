use chrono::{DateTime, FixedOffset, TimeDelta};

pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";
pub const DEFAULT_INTERVAL: &str = "PT5M";

/// Parameters of a device history request.
///
/// Unset bounds are resolved against the time the request is issued: `to` defaults to now and
/// `from` to one day before `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryQuery {
    value_name: String,
    from: Option<DateTime<FixedOffset>>,
    to: Option<DateTime<FixedOffset>>,
    interval: Option<String>,
}

impl HistoryQuery {
    pub fn new(value_name: impl Into<String>) -> Self {
        HistoryQuery {
            value_name: value_name.into(),
            from: None,
            to: None,
            interval: None,
        }
    }

    pub fn from(mut self, from: DateTime<FixedOffset>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to(mut self, to: DateTime<FixedOffset>) -> Self {
        self.to = Some(to);
        self
    }

    /// ISO-8601 duration between samples, for example `PT1H`.
    pub fn interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    pub fn query_params(&self, now: DateTime<FixedOffset>) -> Vec<(&'static str, String)> {
        let to = self.to.unwrap_or(now);
        let from = self.from.unwrap_or(to - TimeDelta::days(1));
        let interval = self.interval.as_deref().unwrap_or(DEFAULT_INTERVAL);

        vec![
            ("valuename", self.value_name.clone()),
            ("from", from.format(TIME_FORMAT).to_string()),
            ("to", to.format(TIME_FORMAT).to_string()),
            ("interval", interval.to_string()),
        ]
    }
}
