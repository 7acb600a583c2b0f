//! Configuration structures for ifcbot-core.
//!
//! Explicit configuration objects passed by the caller (CLI, tests, embedding
//! hosts). The core crate never reads environment variables; two runs with the
//! same config and the same input produce the same bytes.

use crate::errors::{IfcBotError, IfcBotResult};

/// Global configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertConfig {
    pub namespaces: NamespaceConfig,
    pub limits: LimitsConfig,
}

/// Prefix IRIs written at the top of every Turtle document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceConfig {
    pub rdf: String,
    pub rdfs: String,
    pub bot: String,
    /// Namespace used to mint instance identifiers.
    pub instances: String,
    /// Local-name prefix placed before the STEP id (`inst_` → `ex:inst_42`).
    pub instance_prefix: String,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            rdf: "http://www.w3.org/1999/02/22-rdf-syntax-ns#".to_string(),
            rdfs: "http://www.w3.org/2000/01/rdf-schema#".to_string(),
            bot: "https://w3id.org/bot#".to_string(),
            instances: "http://example.com/instances#".to_string(),
            instance_prefix: "inst_".to_string(),
        }
    }
}

impl NamespaceConfig {
    /// Prefix declarations in output order.
    pub fn prefixes(&self) -> [(&'static str, &str); 4] {
        [
            ("rdf", self.rdf.as_str()),
            ("rdfs", self.rdfs.as_str()),
            ("bot", self.bot.as_str()),
            ("ex", self.instances.as_str()),
        ]
    }
}

/// Resource limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    pub max_input_bytes: usize,
    pub max_records: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 512 * 1024 * 1024,
            max_records: 10_000_000,
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &ConvertConfig) -> IfcBotResult<()> {
    for (prefix, iri) in cfg.namespaces.prefixes() {
        if iri.is_empty() {
            return Err(IfcBotError::invalid_argument(format!(
                "namespace IRI for '{prefix}' must not be empty"
            )));
        }
        if !(iri.ends_with('#') || iri.ends_with('/')) {
            return Err(IfcBotError::invalid_argument(format!(
                "namespace IRI for '{prefix}' must end with '#' or '/': {iri}"
            )));
        }
        if iri.chars().any(|c| c.is_whitespace() || c == '<' || c == '>') {
            return Err(IfcBotError::invalid_argument(format!(
                "namespace IRI for '{prefix}' contains invalid characters: {iri}"
            )));
        }
    }

    let p = &cfg.namespaces.instance_prefix;
    if p.is_empty() {
        return Err(IfcBotError::invalid_argument(
            "instance prefix must not be empty",
        ));
    }
    if !p.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(IfcBotError::invalid_argument(format!(
            "instance prefix must match [A-Za-z0-9_-]+: {p}"
        )));
    }

    if cfg.limits.max_input_bytes == 0 {
        return Err(IfcBotError::invalid_argument(
            "max_input_bytes must be greater than zero",
        ));
    }

    if cfg.limits.max_records == 0 {
        return Err(IfcBotError::invalid_argument(
            "max_records must be greater than zero",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = ConvertConfig::default();
        validate_config(&cfg).unwrap();
    }

    #[test]
    fn namespace_without_separator_detected() {
        let mut cfg = ConvertConfig::default();
        cfg.namespaces.instances = "http://example.com/instances".to_string();
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("'ex'"));
    }

    #[test]
    fn empty_instance_prefix_detected() {
        let mut cfg = ConvertConfig::default();
        cfg.namespaces.instance_prefix = "".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn zero_limits_detected() {
        let mut cfg = ConvertConfig::default();
        cfg.limits.max_records = 0;
        assert!(validate_config(&cfg).is_err());
    }
}
