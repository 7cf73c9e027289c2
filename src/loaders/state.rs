use std::collections::BTreeMap;

use super::bundles::{self, BundleName};
use super::types::DataLoaderType;

/// A single config field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Text(String),
    List(Vec<String>),
}

impl ConfigValue {
    pub fn is_empty(&self) -> bool {
        match self {
            ConfigValue::Text(s) => s.is_empty(),
            ConfigValue::List(v) => v.is_empty(),
        }
    }
}

pub type PluginConfig = BTreeMap<String, ConfigValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfiguredState {
    #[default]
    Unconfigured,
    Configured,
    InvalidConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegrafPlugin {
    pub name: String,
    pub configured: ConfiguredState,
    pub active: bool,
    pub config: PluginConfig,
}

impl TelegrafPlugin {
    /// New plugin with every known field present but empty
    pub fn new(name: &str) -> Self {
        let config = bundles::config_fields(name)
            .iter()
            .map(|(field, is_list)| {
                let value = if *is_list {
                    ConfigValue::List(Vec::new())
                } else {
                    ConfigValue::Text(String::new())
                };
                (field.to_string(), value)
            })
            .collect();

        let configured = if bundles::requires_config(name) {
            ConfiguredState::Unconfigured
        } else {
            ConfiguredState::Configured
        };

        Self {
            name: name.to_string(),
            configured,
            active: false,
            config,
        }
    }
}

/// Plugin selection and configuration for one wizard session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataLoadersState {
    pub loader_type: DataLoaderType,
    pub telegraf_plugins: Vec<TelegrafPlugin>,
    pub plugin_bundles: Vec<BundleName>,
}

impl DataLoadersState {
    pub fn plugin(&self, name: &str) -> Option<&TelegrafPlugin> {
        self.telegraf_plugins.iter().find(|p| p.name == name)
    }

    fn plugin_mut(&mut self, name: &str) -> Option<&mut TelegrafPlugin> {
        self.telegraf_plugins.iter_mut().find(|p| p.name == name)
    }

    pub fn active_plugin(&self) -> Option<&TelegrafPlugin> {
        self.telegraf_plugins.iter().find(|p| p.active)
    }

    pub fn set_loader_type(&mut self, loader_type: DataLoaderType) {
        self.loader_type = loader_type;
    }

    /// Set a single-valued field
    pub fn update_plugin_config(&mut self, plugin: &str, field: &str, value: &str) {
        if let Some(p) = self.plugin_mut(plugin) {
            p.config
                .insert(field.to_string(), ConfigValue::Text(value.to_string()));
        }
    }

    /// Append to a list field, creating it if needed
    pub fn add_config_value(&mut self, plugin: &str, field: &str, value: &str) {
        let Some(p) = self.plugin_mut(plugin) else {
            return;
        };
        match p.config.get_mut(field) {
            Some(ConfigValue::List(values)) => values.push(value.to_string()),
            _ => {
                p.config
                    .insert(field.to_string(), ConfigValue::List(vec![value.to_string()]));
            }
        }
    }

    pub fn remove_config_value(&mut self, plugin: &str, field: &str, value: &str) {
        if let Some(p) = self.plugin_mut(plugin) {
            if let Some(ConfigValue::List(values)) = p.config.get_mut(field) {
                values.retain(|v| v != value);
            }
        }
    }

    /// Replace one element of a list field. Out-of-range indices are ignored.
    pub fn set_config_array_value(&mut self, plugin: &str, field: &str, value: &str, index: usize) {
        if let Some(p) = self.plugin_mut(plugin) {
            if let Some(ConfigValue::List(values)) = p.config.get_mut(field) {
                if let Some(slot) = values.get_mut(index) {
                    *slot = value.to_string();
                }
            }
        }
    }

    /// Make `plugin` the only active plugin. An empty name clears the pointer.
    pub fn set_active_plugin(&mut self, plugin: &str) {
        for p in &mut self.telegraf_plugins {
            p.active = p.name == plugin;
        }
    }

    /// Replace the whole config of a plugin and mark it configured
    pub fn set_plugin_configuration(&mut self, plugin: &str, config: PluginConfig) {
        if let Some(p) = self.plugin_mut(plugin) {
            p.config = config;
            p.configured = ConfiguredState::Configured;
        }
    }

    pub fn add_plugin_bundle(&mut self, bundle: BundleName) {
        if self.plugin_bundles.contains(&bundle) {
            return;
        }
        self.plugin_bundles.push(bundle);

        for name in bundle.plugins() {
            if self.plugin(name).is_none() {
                self.telegraf_plugins.push(TelegrafPlugin::new(name));
            }
        }
    }

    /// Drop a bundle and every plugin no other selected bundle still needs
    pub fn remove_plugin_bundle(&mut self, bundle: BundleName) {
        self.plugin_bundles.retain(|b| *b != bundle);

        let still_needed: Vec<&str> = self
            .plugin_bundles
            .iter()
            .flat_map(|b| b.plugins().iter().copied())
            .collect();

        self.telegraf_plugins.retain(|p| {
            !bundle.plugins().contains(&p.name.as_str()) || still_needed.contains(&p.name.as_str())
        });
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when every plugin is ready to be written out
    pub fn all_configured(&self) -> bool {
        !self.telegraf_plugins.is_empty()
            && self
                .telegraf_plugins
                .iter()
                .all(|p| p.configured == ConfiguredState::Configured)
    }
}
