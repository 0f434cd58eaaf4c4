use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load, parse and validate configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    config.validate()?;

    info!(
        "Configuration has {} scripted steps{}",
        config.steps.len(),
        if config.traffic.is_some() { " and synthetic traffic" } else { "" }
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let yaml = r#"
translator:
  short_pool_start: 0
  short_pool_end: 3
steps:
  - to_short: "00:11:22:33:44:55"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.translator.short_pool_end, 3);
        assert_eq!(config.steps.len(), 1);
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "translator:\n  short_pool_end: 255\n").unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_config(Path::new("/nonexistent/uanbridge.yaml")).is_err());
    }

    #[test]
    fn test_load_malformed_address() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "steps:\n  - to_short: \"00:11:22\"\n").unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }
}
