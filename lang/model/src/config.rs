//! The on-disk form of a role model.

use crate::err::*;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A role model as written in TOML.
///
/// ```toml
/// top_variable = "top"
/// top_role = ":TOP"
/// roles = [":ARG[0-9]", ":mod"]
///
/// [normalizations]
/// ":mod-of" = ":domain"
///
/// [[reifications]]
/// role = ":mod"
/// concept = "have-mod-91"
/// source = ":ARG1"
/// target = ":ARG2"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    #[serde(default = "default_top_variable")]
    pub top_variable: String,
    #[serde(default = "default_top_role")]
    pub top_role: String,
    /// Role names; each is a regular expression matched against whole roles.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Preferred spellings, applied after inversion is canonicalized.
    #[serde(default)]
    pub normalizations: IndexMap<String, String>,
    #[serde(default)]
    pub reifications: Vec<Reification>,
}

/// `role` between a source and a target is equivalent to a `concept` node
/// with the source on its `source` role and the target on its `target` role.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Reification {
    pub role: String,
    pub concept: String,
    pub source: String,
    pub target: String,
}

fn default_top_variable() -> String {
    "top".to_string()
}
fn default_top_role() -> String {
    ":TOP".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            top_variable: default_top_variable(),
            top_role: default_top_role(),
            roles: Vec::new(),
            normalizations: IndexMap::new(),
            reifications: Vec::new(),
        }
    }
}

impl ModelConfig {
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| ModelError::ConfigNotFound(path.to_path_buf(), e))?;
        Self::from_toml(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_fill_missing_fields() {
        let config = ModelConfig::from_toml("roles = [':ARG[0-9]']").unwrap();
        assert_eq!(config.top_variable, "top");
        assert_eq!(config.top_role, ":TOP");
        assert_eq!(config.roles, vec![":ARG[0-9]".to_string()]);
        assert!(config.reifications.is_empty());
        assert_eq!(ModelConfig::from_toml("").unwrap(), ModelConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            ModelConfig::from_toml("rolez = []"),
            Err(ModelError::InvalidConfig(_))
        ));
    }
}
