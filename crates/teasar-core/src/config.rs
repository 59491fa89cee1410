//! Configuration for teasar
//!
//! Configuration is read from a TOML file (by convention `teasar.toml`).
//! Every key is optional; missing keys take the defaults listed in
//! [`types`]. CLI flags override file values.

pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{Result, TeasarError};

pub use types::{
    ComponentErrorPolicy, GraphConfig, NeuronConfig, SkeletonConfig, TeasarConfig,
    DEFAULT_INVALIDATION_D, DEFAULT_NEURON_CC_VERTEX_THRESH, DEFAULT_SOMA_THRESH,
};

impl TeasarConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| TeasarError::io_operation("read config", path.display(), e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TeasarConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.skeleton.validate()?;
        if !self.neuron.soma_thresh.is_finite() || self.neuron.soma_thresh < 0.0 {
            bail_invalid!("neuron.soma_thresh", self.neuron.soma_thresh);
        }
        Ok(())
    }
}

impl SkeletonConfig {
    /// The invalidation radius must be a finite, non-negative distance
    pub fn validate(&self) -> Result<()> {
        if !self.invalidation_d.is_finite() || self.invalidation_d < 0.0 {
            bail_invalid!("invalidation_d", self.invalidation_d);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeWeighting;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TeasarConfig::from_toml_str("").unwrap();
        assert_eq!(config, TeasarConfig::default());
        assert_eq!(config.skeleton.invalidation_d, 10_000.0);
        assert_eq!(config.skeleton.cc_vertex_thresh, 0);
        assert!(config.skeleton.parallel);
        assert_eq!(config.neuron.cc_vertex_thresh, 100);
        assert_eq!(config.graph.weighting, EdgeWeighting::Euclidean);
    }

    #[test]
    fn test_partial_config() {
        let config = TeasarConfig::from_toml_str(
            r#"
            [skeleton]
            invalidation_d = 2.5
            return_map = true
            on_component_error = "skip"

            [graph]
            weighting = "unit"
            "#,
        )
        .unwrap();

        assert_eq!(config.skeleton.invalidation_d, 2.5);
        assert!(config.skeleton.return_map);
        assert_eq!(
            config.skeleton.on_component_error,
            ComponentErrorPolicy::Skip
        );
        assert_eq!(config.graph.weighting, EdgeWeighting::Unit);
        assert_eq!(config.neuron.soma_thresh, 10_000.0);
    }

    #[test]
    fn test_negative_invalidation_rejected() {
        let err = TeasarConfig::from_toml_str("[skeleton]\ninvalidation_d = -1.0\n").unwrap_err();
        assert!(matches!(err, TeasarError::InvalidValue { .. }));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err =
            TeasarConfig::from_toml_str("[skeleton]\non_component_error = \"retry\"\n").unwrap_err();
        assert!(matches!(err, TeasarError::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teasar.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[neuron]\nsoma_thresh = 7.5").unwrap();

        let config = TeasarConfig::load(&path).unwrap();
        assert_eq!(config.neuron.soma_thresh, 7.5);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TeasarConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, TeasarError::FailedOperationWithTarget { .. }));
    }
}
