//! Engine configuration.

use serde::Serialize;
use stitch_ir::ClassName;
use stitch_manifest::EngineConfigFile;

/// Class names the generated code links against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeNames {
    pub install_in: ClassName,
    pub view_model: ClassName,
    pub view_model_key: ClassName,
    pub view_model_interface_key: ClassName,
    pub assisted_factory_key: ClassName,
    pub json_adapter_key: ClassName,
    pub json_adapter_interface: ClassName,
    pub enum_json_adapter: ClassName,
    pub network_service_generator: ClassName,
    pub network_service_provider: ClassName,
}

impl Default for RuntimeNames {
    fn default() -> Self {
        Self {
            install_in: ClassName::get("dagger.hilt.components", "SingletonComponent"),
            view_model: ClassName::get("androidx.lifecycle", "ViewModel"),
            view_model_key: ClassName::get("com.personatech.base.di", "ViewModelKey"),
            view_model_interface_key: ClassName::get(
                "com.personatech.base.di",
                "ViewModelInterfaceKey",
            ),
            assisted_factory_key: ClassName::get(
                "com.personatech.base.di",
                "PradarshanAssistedFactoryKey",
            ),
            json_adapter_key: ClassName::get("com.personatech.core.di", "JsonAdapterKey"),
            json_adapter_interface: ClassName::get(
                "com.personatech.core.di",
                "PradarshanMoshiAdapter",
            ),
            enum_json_adapter: ClassName::get(
                "com.personatech.core.moshiadapters",
                "EnumJsonAdapter",
            ),
            network_service_generator: ClassName::get(
                "com.personatech.networkapi",
                "NetworkServiceGenerator",
            ),
            network_service_provider: ClassName::get(
                "com.personatech.networkapi",
                "NetworkServiceProvider",
            ),
        }
    }
}

impl RuntimeNames {
    fn slot(&mut self, key: &str) -> Option<&mut ClassName> {
        Some(match key {
            "install_in" => &mut self.install_in,
            "view_model" => &mut self.view_model,
            "view_model_key" => &mut self.view_model_key,
            "view_model_interface_key" => &mut self.view_model_interface_key,
            "assisted_factory_key" => &mut self.assisted_factory_key,
            "json_adapter_key" => &mut self.json_adapter_key,
            "json_adapter_interface" => &mut self.json_adapter_interface,
            "enum_json_adapter" => &mut self.enum_json_adapter,
            "network_service_generator" => &mut self.network_service_generator,
            "network_service_provider" => &mut self.network_service_provider,
            _ => return None,
        })
    }
}

/// Settings for one engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    /// Annotation placed on every generated type, if any.
    pub generated: Option<ClassName>,
    pub generate_keep_rules: bool,
    /// Withhold every artifact of a round that reported an error.
    pub abort_round_on_error: bool,
    pub runtime: RuntimeNames,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generated: None,
            generate_keep_rules: true,
            abort_round_on_error: false,
            runtime: RuntimeNames::default(),
        }
    }
}

impl EngineConfig {
    /// Build the configuration from a parsed `stitch.toml`.
    pub fn from_file(file: &EngineConfigFile) -> Self {
        let mut config = Self {
            generated: file
                .options
                .generated
                .as_deref()
                .and_then(ClassName::best_guess),
            generate_keep_rules: file.options.generate_keep_rules,
            abort_round_on_error: file.options.abort_round_on_error,
            runtime: RuntimeNames::default(),
        };
        for (key, value) in file.runtime.entries() {
            if let (Some(slot), Some(name)) =
                (config.runtime.slot(key), ClassName::best_guess(value))
            {
                *slot = name;
            }
        }
        config
    }
}
