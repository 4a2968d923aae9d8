use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// The layer's one recognized option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// Box-kernel edge length in device pixels. Bigger is softer and slower.
    pub blur_size: i32,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self { blur_size: 10 }
    }
}

impl LayerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.blur_size < 1 {
            return Err(Error::invalid(format!("blur_size must be at least 1, got {}", self.blur_size)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("blur-layer-{}-{name}.toml", std::process::id()))
    }

    #[test]
    fn parses_blur_size() {
        let config: LayerConfig = toml::from_str("blur_size = 4").unwrap();
        assert_eq!(config.blur_size, 4);
    }

    #[test]
    fn missing_field_uses_default() {
        let config: LayerConfig = toml::from_str("").unwrap();
        assert_eq!(config, LayerConfig::default());
        assert_eq!(config.blur_size, 10);
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("roundtrip");
        let config = LayerConfig { blur_size: 7 };
        config.save(&path).unwrap();
        assert_eq!(LayerConfig::load(&path).unwrap(), config);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_rejects_non_positive_size() {
        let path = temp_path("zero");
        fs::write(&path, "blur_size = 0\n").unwrap();
        let err = LayerConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_reports_missing_file_and_bad_toml() {
        assert!(matches!(LayerConfig::load(temp_path("absent")), Err(Error::ConfigRead(_))));
        let path = temp_path("garbage");
        fs::write(&path, "blur_size = \"wide\"").unwrap();
        assert!(matches!(LayerConfig::load(&path), Err(Error::ConfigParse(_))));
        let _ = fs::remove_file(&path);
    }
}
