//! Wait configuration and the loosely-typed params layer.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::error::WaitError;
use crate::selector::Selector;

/// Default total wait deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default interval between snapshot polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Configuration bundle for one convergence wait.
///
/// Constructed once per invocation and read-only during the wait.
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Collection to observe.
    pub selector: Selector,
    /// Number of objects that must reach the target state.
    pub desired_count: usize,
    /// Interval between snapshot polls.
    pub poll_interval: Duration,
    /// Total wait deadline.
    pub timeout: Duration,
    /// Whether the per-poll progress line is logged.
    pub enable_logging: bool,
    /// Identity of the caller, used as the log line prefix.
    pub caller: String,
}

impl WaitOptions {
    /// Creates options with defaults for everything but the selector and
    /// the desired count.
    pub fn new(caller: &str, selector: Selector, desired_count: usize) -> Self {
        Self {
            selector,
            desired_count,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            enable_logging: true,
            caller: caller.to_string(),
        }
    }

    /// Builds options for `caller` from a params document.
    ///
    /// `desiredCount` is required; `namespace`, `labelSelector`,
    /// `fieldSelector`, `timeout` and `pollInterval` fall back to their
    /// defaults when absent.
    pub fn from_params(caller: &str, params: &Params) -> Result<Self, WaitError> {
        let desired_count = params.required_count("desiredCount")?;
        let namespace = params.string_or("namespace", "")?;
        let label_selector = params.string_or("labelSelector", "")?;
        let field_selector = params.string_or("fieldSelector", "")?;
        let timeout = params.duration_or("timeout", DEFAULT_TIMEOUT)?;
        let poll_interval = params.duration_or("pollInterval", DEFAULT_POLL_INTERVAL)?;

        let namespace = if namespace.is_empty() {
            None
        } else {
            Some(namespace)
        };
        Ok(Self {
            selector: Selector::new(namespace, label_selector, field_selector),
            desired_count,
            poll_interval,
            timeout,
            enable_logging: true,
            caller: caller.to_string(),
        })
    }

    /// Checks option consistency before a wait starts.
    pub fn validate(&self) -> Result<(), WaitError> {
        if self.caller.is_empty() {
            return Err(WaitError::Configuration(
                "caller name must not be empty".to_string(),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(WaitError::Configuration(
                "poll interval must be positive".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(WaitError::Configuration(
                "timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loosely-typed measurement parameters with defaulting accessors.
///
/// Wraps a JSON object, as parsed from a measurement params document.
/// Unknown keys are ignored by consumers.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: Map<String, Value>,
}

impl Params {
    /// Creates an empty params document.
    pub fn new() -> Self {
        Self { values: Map::new() }
    }

    /// Wraps a parsed document, which must be an object at the top level.
    pub fn from_value(value: Value) -> Result<Self, WaitError> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            _ => Err(WaitError::Configuration(
                "params document must be an object".to_string(),
            )),
        }
    }

    /// Sets one param, replacing any existing value for the key.
    pub fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    /// Required non-negative integer param.
    pub fn required_count(&self, key: &str) -> Result<usize, WaitError> {
        match self.values.get(key) {
            Some(value) => count_value(key, value),
            None => Err(WaitError::Configuration(format!(
                "{}: parameter is required",
                key
            ))),
        }
    }

    /// String param, or `default` when the key is absent.
    pub fn string_or(&self, key: &str, default: &str) -> Result<String, WaitError> {
        match self.values.get(key) {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(_) => Err(WaitError::Configuration(format!(
                "{}: must be a string",
                key
            ))),
            None => Ok(default.to_string()),
        }
    }

    /// Duration param, or `default` when the key is absent.
    ///
    /// Accepts non-negative integer seconds or strings of integer
    /// segments with `ms`, `s`, `m` or `h` units, e.g. `90s` or `1h30m`.
    pub fn duration_or(&self, key: &str, default: Duration) -> Result<Duration, WaitError> {
        match self.values.get(key) {
            Some(value) => duration_value(key, value),
            None => Ok(default),
        }
    }
}

fn count_value(key: &str, value: &Value) -> Result<usize, WaitError> {
    let invalid = || WaitError::Configuration(format!("{}: must be a non-negative integer", key));
    match value {
        Value::Number(number) => {
            let count = number.as_u64().ok_or_else(invalid)?;
            usize::try_from(count).map_err(|_| invalid())
        }
        Value::String(text) => text.trim().parse::<usize>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn duration_value(key: &str, value: &Value) -> Result<Duration, WaitError> {
    match value {
        Value::Number(number) => number.as_u64().map(Duration::from_secs).ok_or_else(|| {
            WaitError::Configuration(format!(
                "{}: must be non-negative seconds or a duration string",
                key
            ))
        }),
        Value::String(text) => parse_duration(text).ok_or_else(|| {
            WaitError::Configuration(format!("{}: invalid duration '{}'", key, text))
        }),
        _ => Err(WaitError::Configuration(format!(
            "{}: must be non-negative seconds or a duration string",
            key
        ))),
    }
}

fn parse_duration(text: &str) -> Option<Duration> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let mut total = Duration::ZERO;
    let mut rest = text;
    while !rest.is_empty() {
        let digit_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digit_end == 0 {
            return None;
        }
        let magnitude: u64 = rest[..digit_end].parse().ok()?;
        rest = &rest[digit_end..];

        let unit_end = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let step = match &rest[..unit_end] {
            "ms" => Duration::from_millis(magnitude),
            "s" => Duration::from_secs(magnitude),
            "m" => Duration::from_secs(magnitude.checked_mul(60)?),
            "h" => Duration::from_secs(magnitude.checked_mul(3600)?),
            _ => return None,
        };
        rest = &rest[unit_end..];
        total = total.checked_add(step)?;
    }
    Some(total)
}
