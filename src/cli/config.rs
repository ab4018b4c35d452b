// FILE: src/cli/config.rs

use crate::error::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub input: Option<String>,
    pub output: Option<String>,
    pub element_namespace: Option<String>,
    pub import_source: Option<String>,
    pub mark_internal: Option<bool>,
}

pub fn load(config_path: &str) -> Result<ConfigFile> {
    let config_content = fs::read_to_string(config_path).map_err(|e| GeneratorError::FileNotFound {
        path: format!("Config file {}: {}", config_path, e),
    })?;

    let config = parse(config_path, &config_content)?;
    log::info!("Loaded configuration from {}", config_path);
    Ok(config)
}

fn parse(config_path: &str, content: &str) -> Result<ConfigFile> {
    if config_path.ends_with(".json") {
        serde_json::from_str(content)
            .map_err(|e| GeneratorError::invalid_config(format!("Invalid JSON config: {}", e)))
    } else if config_path.ends_with(".toml") {
        toml::from_str(content).map_err(|e| GeneratorError::invalid_config(format!("Invalid TOML config: {}", e)))
    } else {
        Err(GeneratorError::invalid_config("Config file must be .json or .toml format"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_and_json() {
        let toml_config = parse(
            "tsxgen.toml",
            "input = \"model.json\"\nelement_namespace = \"host\"\nmark_internal = false\n",
        )
        .unwrap();
        assert_eq!(toml_config.input.as_deref(), Some("model.json"));
        assert_eq!(toml_config.element_namespace.as_deref(), Some("host"));
        assert_eq!(toml_config.mark_internal, Some(false));
        assert!(toml_config.output.is_none());

        let json_config = parse("tsxgen.json", r#"{ "output": "gen/out.tsx", "import_source": "preact/compat" }"#).unwrap();
        assert_eq!(json_config.output.as_deref(), Some("gen/out.tsx"));
        assert_eq!(json_config.import_source.as_deref(), Some("preact/compat"));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(matches!(parse("tsxgen.yaml", ""), Err(GeneratorError::InvalidConfig { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");
        assert!(matches!(
            load(path.to_str().unwrap()),
            Err(GeneratorError::FileNotFound { .. })
        ));
    }
}
