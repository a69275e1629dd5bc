//! Dispatch Configuration
//!
//! Options that shape how method tables are built and how the fallback
//! behaves. Usually left at defaults; can be loaded from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dispatch::{DispatchError, DispatchResult};

/// Highest arity a method table may be built for.
///
/// Tables are filled for every signature up to `max_arity`, so the table size
/// grows as `members^max_arity`.
pub const ARITY_LIMIT: usize = 6;

/// Configuration for building a [`Method`](crate::Method).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Largest number of argument positions a call may have.
    pub max_arity: usize,

    /// What the synthetic fallback does for unimplemented signatures.
    pub fallback: FallbackPolicy,

    /// Log every accumulated argument at `trace` level.
    pub trace_args: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_arity: 3,
            fallback: FallbackPolicy::Error,
            trace_args: false,
        }
    }
}

/// Behavior of the fallback handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Return [`DispatchError::Unimplemented`].
    Error,
    /// Panic with the unimplemented-signature message.
    Panic,
}

impl DispatchConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> DispatchResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> DispatchResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks that `max_arity` is within `1..=ARITY_LIMIT`.
    pub fn validate(&self) -> DispatchResult<()> {
        if self.max_arity == 0 || self.max_arity > ARITY_LIMIT {
            return Err(DispatchError::Config(format!(
                "max_arity must be between 1 and {}, got {}",
                ARITY_LIMIT, self.max_arity
            )));
        }
        Ok(())
    }

    pub fn with_max_arity(mut self, max_arity: usize) -> Self {
        self.max_arity = max_arity;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_trace_args(mut self, trace_args: bool) -> Self {
        self.trace_args = trace_args;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.max_arity, 3);
        assert_eq!(config.fallback, FallbackPolicy::Error);
        assert!(!config.trace_args);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DispatchConfig::from_toml_str("fallback = \"panic\"").unwrap();
        assert_eq!(
            config,
            DispatchConfig::default().with_fallback(FallbackPolicy::Panic)
        );
    }

    #[test]
    fn test_full_toml() {
        let source = r#"
max_arity = 4
fallback = "error"
trace_args = true
"#;
        let config = DispatchConfig::from_toml_str(source).unwrap();
        assert_eq!(config.max_arity, 4);
        assert!(config.trace_args);
    }

    #[test]
    fn test_rejects_zero_arity() {
        let err = DispatchConfig::from_toml_str("max_arity = 0").unwrap_err();
        assert!(matches!(err, DispatchError::Config(_)));
    }

    #[test]
    fn test_rejects_arity_over_limit() {
        let err = DispatchConfig::default()
            .with_max_arity(ARITY_LIMIT + 1)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("max_arity"));
    }

    #[test]
    fn test_builder_setters() {
        let config = DispatchConfig::new()
            .with_max_arity(2)
            .with_fallback(FallbackPolicy::Panic)
            .with_trace_args(true);
        assert_eq!(
            config,
            DispatchConfig {
                max_arity: 2,
                fallback: FallbackPolicy::Panic,
                trace_args: true,
            }
        );
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let err = DispatchConfig::from_toml_str("fallback = \"ignore\"").unwrap_err();
        assert!(matches!(err, DispatchError::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_arity = 2").unwrap();

        let config = DispatchConfig::load(file.path()).unwrap();
        assert_eq!(config.max_arity, 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DispatchConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, DispatchError::Io(_)));
    }
}
