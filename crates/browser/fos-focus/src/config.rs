//! Focus Subsystem Configuration

use serde::{Deserialize, Serialize};

use crate::FocusError;

/// Configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Prefix for live region element ids (`{prefix}-polite`, `{prefix}-assertive`)
    pub live_region_prefix: String,

    /// Whether announcements replace the region's content as a whole
    pub live_region_atomic: bool,

    /// Pass `preventScroll` when moving focus programmatically
    pub prevent_scroll: bool,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            live_region_prefix: "fos-live-region".to_string(),
            live_region_atomic: true,
            prevent_scroll: true,
        }
    }
}

impl FocusConfig {
    /// Check that generated ids will be valid
    pub fn validate(&self) -> Result<(), FocusError> {
        if self.live_region_prefix.is_empty() {
            return Err(FocusError::InvalidConfig("live_region_prefix is empty".into()));
        }
        if self.live_region_prefix.chars().any(char::is_whitespace) {
            return Err(FocusError::InvalidConfig(format!(
                "live_region_prefix {:?} contains whitespace",
                self.live_region_prefix
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = FocusConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.prevent_scroll);
        assert!(config.live_region_atomic);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: FocusConfig = serde_json::from_str(r#"{"live_region_prefix": "toast"}"#).unwrap();
        assert_eq!(config.live_region_prefix, "toast");
        assert!(config.prevent_scroll);
        assert!(config.live_region_atomic);

        let empty: FocusConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, FocusConfig::default());
    }

    #[test]
    fn test_config_round_trip() {
        let config = FocusConfig { prevent_scroll: false, ..Default::default() };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"prevent_scroll\":false"));
        assert_eq!(serde_json::from_str::<FocusConfig>(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_prefix() {
        let empty = FocusConfig { live_region_prefix: String::new(), ..Default::default() };
        assert!(matches!(empty.validate(), Err(FocusError::InvalidConfig(_))));

        let spaced = FocusConfig { live_region_prefix: "my region".into(), ..Default::default() };
        let err = spaced.validate().unwrap_err();
        assert!(err.to_string().contains("whitespace"));
    }
}
