/// Constraint evaluator configuration.
///
/// Thresholds are fixed when the evaluator is built. The JSON form stores
/// durations as whole milliseconds:
///
/// ```json
/// { "receive_threshold_ms": 172800000, "send_threshold_ms": 86400000, "max_edit_count": 10 }
/// ```
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Window for accepting a remote delete/edit without elevated privilege.
pub const DEFAULT_RECEIVE_THRESHOLD: Duration = Duration::from_secs(2 * 24 * 60 * 60);

/// Window for the author to issue a delete/edit of their own message.
pub const DEFAULT_SEND_THRESHOLD: Duration = Duration::from_secs(24 * 60 * 60);

/// Edits a single message may accumulate.
pub const DEFAULT_MAX_EDIT_COUNT: u32 = 10;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("receive threshold must be at least 1 ms")]
    ZeroReceiveThreshold,

    #[error("send threshold must be at least 1 ms")]
    ZeroSendThreshold,

    #[error("max edit count must be non-zero")]
    ZeroEditCount,

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ─── Configuration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintConfig {
    #[serde(rename = "receive_threshold_ms", with = "duration_ms")]
    pub receive_threshold: Duration,
    #[serde(rename = "send_threshold_ms", with = "duration_ms")]
    pub send_threshold: Duration,
    pub max_edit_count: u32,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            receive_threshold: DEFAULT_RECEIVE_THRESHOLD,
            send_threshold: DEFAULT_SEND_THRESHOLD,
            max_edit_count: DEFAULT_MAX_EDIT_COUNT,
        }
    }
}

impl ConstraintConfig {
    /// Thresholds are compared in whole milliseconds, so anything under 1 ms
    /// counts as zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.receive_threshold.as_millis() == 0 {
            return Err(ConfigError::ZeroReceiveThreshold);
        }
        if self.send_threshold.as_millis() == 0 {
            return Err(ConfigError::ZeroSendThreshold);
        }
        if self.max_edit_count == 0 {
            return Err(ConfigError::ZeroEditCount);
        }
        Ok(())
    }

    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ConstraintConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub(crate) fn receive_threshold_ms(&self) -> i64 {
        duration_to_ms(self.receive_threshold)
    }

    pub(crate) fn send_threshold_ms(&self) -> i64 {
        duration_to_ms(self.send_threshold)
    }
}

fn duration_to_ms(d: Duration) -> i64 {
    i64::try_from(d.as_millis()).unwrap_or(i64::MAX)
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConstraintConfig::default();
        assert_eq!(config.receive_threshold_ms(), 172_800_000);
        assert_eq!(config.send_threshold_ms(), 86_400_000);
        assert_eq!(config.max_edit_count, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let json = ConstraintConfig::default().to_json().unwrap();
        assert!(json.contains("\"send_threshold_ms\":86400000"));
        let parsed = ConstraintConfig::from_json(&json).unwrap();
        assert_eq!(parsed, ConstraintConfig::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = ConstraintConfig::from_json(r#"{"max_edit_count":3}"#).unwrap();
        assert_eq!(config.max_edit_count, 3);
        assert_eq!(config.send_threshold, DEFAULT_SEND_THRESHOLD);
    }

    #[test]
    fn test_zero_values_rejected() {
        let err = ConstraintConfig::from_json(r#"{"send_threshold_ms":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroSendThreshold));

        let err = ConstraintConfig::from_json(r#"{"receive_threshold_ms":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroReceiveThreshold));

        let err = ConstraintConfig::from_json(r#"{"max_edit_count":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroEditCount));
    }

    #[test]
    fn test_sub_millisecond_thresholds_rejected() {
        let config = ConstraintConfig {
            send_threshold: Duration::from_micros(500),
            ..ConstraintConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroSendThreshold)));

        let config = ConstraintConfig {
            receive_threshold: Duration::from_nanos(999_999),
            ..ConstraintConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroReceiveThreshold)));

        let config = ConstraintConfig {
            send_threshold: Duration::from_millis(1),
            ..ConstraintConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let err = ConstraintConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_huge_duration_saturates() {
        let config = ConstraintConfig {
            send_threshold: Duration::MAX,
            ..ConstraintConfig::default()
        };
        assert_eq!(config.send_threshold_ms(), i64::MAX);
    }
}
