use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_saphyr as saphyr;
use std::fs;
use std::path::Path;

/// Runtime settings for the hosting process. Everything is optional in
/// the file; the accessors supply the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct RosterConfig {
    pub rest_port: Option<u16>,
    pub backend: Option<String>,
    pub cbc_path: Option<String>,
    pub time_limit_seconds: Option<u64>,
    pub extensions: Option<Vec<ExtensionConfig>>,
}

impl RosterConfig {
    pub fn rest_port(&self) -> u16 {
        self.rest_port.unwrap_or(8080)
    }

    /// Id of the solver backend to use; the built-in CBC driver unless
    /// overridden to a loaded extension.
    pub fn backend(&self) -> String {
        self.backend.clone().unwrap_or_else(|| "cbc".to_string())
    }

    pub fn cbc_path(&self) -> String {
        self.cbc_path.clone().unwrap_or_else(|| "cbc".to_string())
    }

    /// Per-phase solver time limit.
    pub fn time_limit_seconds(&self) -> u64 {
        self.time_limit_seconds.unwrap_or(120)
    }

    pub fn extensions(&self) -> Option<&[ExtensionConfig]> {
        self.extensions.as_deref()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtensionConfig {
    pub id: String,
    pub path: String,
    #[serde(default)]
    pub enabled: bool,
}

pub fn read_config(path: &Path) -> Result<RosterConfig> {
    read_yaml_file(path)
        .with_context(|| format!("failed to load roster config at {}", path.display()))
}

fn read_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read yaml file at {}", path.display()))?;
    saphyr::from_str(&contents).context("failed to parse yaml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn write_temp_config_yaml(contents: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock went backwards")
            .as_nanos();
        let path = env::temp_dir().join(format!("roster-config-{}.yaml", nanos));
        fs::write(&path, contents).expect("write temp yaml");
        path
    }

    #[test]
    fn read_config_fills_defaults_for_missing_fields() {
        let yaml = r#"
rest_port: 9090
extensions:
  - id: "highs"
    path: "target/release/libroster_highs_ext.so"
    enabled: true
"#;
        let path = write_temp_config_yaml(yaml);
        let result = read_config(&path);
        fs::remove_file(&path).expect("cleanup temp yaml");

        let config = result.expect("read config");
        assert_eq!(config.rest_port(), 9090);
        assert_eq!(config.backend(), "cbc");
        assert_eq!(config.cbc_path(), "cbc");
        assert_eq!(config.time_limit_seconds(), 120);
        let extensions = config.extensions().expect("extensions");
        assert_eq!(extensions.len(), 1);
        assert_eq!(extensions[0].id, "highs");
        assert!(extensions[0].enabled);
    }

    #[test]
    fn defaults_stand_alone_without_a_file() {
        let config = RosterConfig::default();
        assert_eq!(config.rest_port(), 8080);
        assert_eq!(config.backend(), "cbc");
        assert!(config.extensions().is_none());
    }
}
