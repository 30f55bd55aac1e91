//! Configuration shapes the engine consumes.
//!
//! A group is driven by a [`GroupConfig`] whose `components` list holds
//! tagged variants (`{ "type": "clock", ... }`). Loading and validating
//! whole configuration files is the host application's job; this module only
//! defines the shapes the render pass dispatches on.
//!
//! Unrecognized `type` values deserialize into [`ComponentConfig::Unknown`]
//! rather than failing deserialization, so the registry - not the config
//! layer - owns the unknown-discriminant failure and can report it per
//! render pass.

use serde::{Deserialize, Serialize};

/// Configuration for one widget group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Ordered component entries, rendered left to right.
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
}

/// One component entry, tagged by its `type` discriminant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ComponentConfig {
    Clock(ClockConfig),
    Cpu(CpuConfig),
    /// Fallback for discriminants outside the known set. Kept so the
    /// failure surfaces during rendering instead of during deserialization.
    #[serde(untagged)]
    Unknown(UnknownConfig),
}

impl ComponentConfig {
    /// The discriminant as written in the configuration.
    pub fn kind(&self) -> &str {
        match self {
            ComponentConfig::Clock(_) => "clock",
            ComponentConfig::Cpu(_) => "cpu",
            ComponentConfig::Unknown(unknown) => &unknown.kind,
        }
    }
}

/// Clock widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// strftime-style format for the displayed time.
    #[serde(default = "default_clock_format")]
    pub format: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            format: default_clock_format(),
        }
    }
}

fn default_clock_format() -> String {
    "%H:%M:%S".to_string()
}

/// CPU widget configuration. The renderer for this variant is still a stub.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CpuConfig {
    /// How often the gauge should refresh, once implemented.
    #[serde(default)]
    pub refresh_interval_ms: Option<u64>,
}

/// An entry whose `type` is outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownConfig {
    /// The unrecognized discriminant, kept verbatim for error reporting.
    #[serde(rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_known_variants() {
        let config: GroupConfig = serde_json::from_str(
            r#"{
                "components": [
                    { "type": "clock", "format": "%H:%M" },
                    { "type": "cpu" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.components,
            vec![
                ComponentConfig::Clock(ClockConfig {
                    format: "%H:%M".to_string()
                }),
                ComponentConfig::Cpu(CpuConfig {
                    refresh_interval_ms: None
                }),
            ]
        );
    }

    #[test]
    fn test_clock_format_defaults() {
        let entry: ComponentConfig = serde_json::from_str(r#"{ "type": "clock" }"#).unwrap();
        assert_eq!(
            entry,
            ComponentConfig::Clock(ClockConfig {
                format: "%H:%M:%S".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_discriminant_is_captured_not_rejected() {
        let entry: ComponentConfig = serde_json::from_str(r#"{ "type": "gpu" }"#).unwrap();
        assert_eq!(
            entry,
            ComponentConfig::Unknown(UnknownConfig {
                kind: "gpu".to_string()
            })
        );
        assert_eq!(entry.kind(), "gpu");
    }

    #[test]
    fn test_empty_components_by_default() {
        let config: GroupConfig = serde_json::from_str("{}").unwrap();
        assert!(config.components.is_empty());
    }
}
