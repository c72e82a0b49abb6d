//! Engine configuration file (`stitch.toml`).

use std::{path::Path, str::FromStr};

use serde::Deserialize;
use stitch_ir::ClassName;

use crate::{Error, Result, error::SourceContext, validate::find_value_span};

/// Annotations accepted by `options.generated`.
pub const GENERATED_ANNOTATIONS: &[&str] = &[
    "javax.annotation.processing.Generated",
    "javax.annotation.Generated",
];

/// Root of `stitch.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfigFile {
    #[serde(default)]
    pub options: OptionsSection,
    #[serde(default)]
    pub runtime: RuntimeSection,
}

/// `[options]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsSection {
    /// Annotation placed on generated types.
    pub generated: Option<String>,
    #[serde(default = "default_true")]
    pub generate_keep_rules: bool,
    /// Withhold every artifact of a round that reported an error.
    #[serde(default)]
    pub abort_round_on_error: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OptionsSection {
    fn default() -> Self {
        Self {
            generated: None,
            generate_keep_rules: true,
            abort_round_on_error: false,
        }
    }
}

/// `[runtime]` table: class names the generated code links against.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeSection {
    pub install_in: Option<String>,
    pub view_model: Option<String>,
    pub view_model_key: Option<String>,
    pub view_model_interface_key: Option<String>,
    pub assisted_factory_key: Option<String>,
    pub json_adapter_key: Option<String>,
    pub json_adapter_interface: Option<String>,
    pub enum_json_adapter: Option<String>,
    pub network_service_generator: Option<String>,
    pub network_service_provider: Option<String>,
}

impl RuntimeSection {
    /// Configured entries as `(key, value)` pairs.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("install_in", &self.install_in),
            ("view_model", &self.view_model),
            ("view_model_key", &self.view_model_key),
            ("view_model_interface_key", &self.view_model_interface_key),
            ("assisted_factory_key", &self.assisted_factory_key),
            ("json_adapter_key", &self.json_adapter_key),
            ("json_adapter_interface", &self.json_adapter_interface),
            ("enum_json_adapter", &self.enum_json_adapter),
            ("network_service_generator", &self.network_service_generator),
            ("network_service_provider", &self.network_service_provider),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

impl FromStr for EngineConfigFile {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, "stitch.toml")
    }
}

impl EngineConfigFile {
    /// Load `stitch.toml` from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_config(&content, &path.display().to_string())
    }

    /// Load the file if it exists, otherwise use defaults.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

fn parse_config(content: &str, filename: &str) -> Result<EngineConfigFile> {
    let source = SourceContext::new(content, filename);
    let config: EngineConfigFile = toml::from_str(content).map_err(|e| source.parse_error(e))?;

    if let Some(generated) = &config.options.generated
        && !GENERATED_ANNOTATIONS.contains(&generated.as_str())
    {
        return Err(source.invalid_generated_error(
            generated,
            find_value_span(content, generated, 0),
        ));
    }

    for (key, value) in config.runtime.entries() {
        if ClassName::best_guess(value).is_none_or(|name| name.package().is_empty()) {
            return Err(source.invalid_class_name_error(
                key,
                value,
                find_value_span(content, value, 0),
            ));
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfigFile::from_str("").unwrap();
        assert!(config.options.generated.is_none());
        assert!(config.options.generate_keep_rules);
        assert!(!config.options.abort_round_on_error);
        assert!(config.runtime.entries().is_empty());
    }

    #[test]
    fn test_parses_options_and_runtime() {
        let config = EngineConfigFile::from_str(
            r#"
            [options]
            generated = "javax.annotation.Generated"
            generate_keep_rules = false

            [runtime]
            view_model = "com.example.base.BaseViewModel"
        "#,
        )
        .unwrap();
        assert_eq!(
            config.options.generated.as_deref(),
            Some("javax.annotation.Generated")
        );
        assert!(!config.options.generate_keep_rules);
        assert_eq!(
            config.runtime.entries(),
            vec![("view_model", "com.example.base.BaseViewModel")]
        );
    }

    #[test]
    fn test_rejects_unknown_generated_annotation() {
        let err = EngineConfigFile::from_str(
            r#"
            [options]
            generated = "lombok.Generated"
        "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidGeneratedOption { .. }));
    }

    #[test]
    fn test_rejects_unqualified_runtime_name() {
        let err = EngineConfigFile::from_str(
            r#"
            [runtime]
            install_in = "SingletonComponent"
        "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidClassName { .. }));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = EngineConfigFile::from_file_or_default(temp.path().join("stitch.toml"));
        assert!(config.is_ok());
    }
}
