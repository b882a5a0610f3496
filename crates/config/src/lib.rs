//! Plugin configuration.
//!
//! The host passes plugin options as a single JSON object when it creates
//! the language service decorator. Configuration is read once per request
//! and never mutated by the engine.

use serde::Deserialize;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid plugin configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Options controlling template discovery and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfig {
    /// Identifier used to tag embedded documents, e.g. the `gql` in
    /// ``gql`query { ... }` ``.
    pub template: String,
    /// Whether documents are expressed as call arguments (`gql('...')`)
    /// instead of tagged template literals.
    pub template_is_call_expression: bool,
    /// Whether to run the colocated-fragment import completeness check.
    pub should_check_for_colocated_fragments: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            template: "gql".to_string(),
            template_is_call_expression: false,
            should_check_for_colocated_fragments: false,
        }
    }
}

impl PluginConfig {
    /// Parse configuration from the host-supplied JSON object.
    ///
    /// Unknown fields are ignored; missing fields fall back to defaults.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ConfigError> {
        Ok(Self::deserialize(value)?)
    }

    /// Length in bytes of the template tag identifier.
    #[must_use]
    pub fn tag_len(&self) -> usize {
        self.template.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = PluginConfig::default();
        assert_eq!(config.template, "gql");
        assert!(!config.template_is_call_expression);
        assert!(!config.should_check_for_colocated_fragments);
    }

    #[test]
    fn test_from_json_full() -> anyhow::Result<()> {
        let config = PluginConfig::from_json(&json!({
            "template": "graphql",
            "templateIsCallExpression": true,
            "shouldCheckForColocatedFragments": true,
        }))?;
        assert_eq!(config.template, "graphql");
        assert!(config.template_is_call_expression);
        assert!(config.should_check_for_colocated_fragments);
        assert_eq!(config.tag_len(), 7);
        Ok(())
    }

    #[test]
    fn test_from_json_partial_falls_back_to_defaults() -> anyhow::Result<()> {
        let config = PluginConfig::from_json(&json!({
            "templateIsCallExpression": true,
            "schema": "./schema.graphql",
        }))?;
        assert_eq!(config.template, "gql");
        assert!(config.template_is_call_expression);
        assert!(!config.should_check_for_colocated_fragments);
        Ok(())
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        let result = PluginConfig::from_json(&serde_json::json!({
            "template": 42,
        }));
        assert!(result.is_err());
    }
}
