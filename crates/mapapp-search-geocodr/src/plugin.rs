//! Plugin implementation registering Geocodr with the host

use mapapp::{App, ConfigEditor, DomainError, I18nDictionary, Plugin, PluginMetadata};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::GeocodrOptions;
use crate::provider::Geocodr;

pub const PLUGIN_NAME: &str = "search-geocodr";
pub const PLUGIN_VERSION: &str = "1.0.0";
pub const MAP_VERSION: &str = "^5.0";

/// UI component editing the plugin configuration
pub const CONFIG_EDITOR_COMPONENT: &str = "SearchGeocodrEditor";

/// Plugin adding Geocodr address search to the host
pub struct SearchGeocodrPlugin {
    metadata: PluginMetadata,
    options: GeocodrOptions,
    instance: Option<Arc<Geocodr>>,
}

impl SearchGeocodrPlugin {
    /// Create the plugin with its built-in identity
    pub fn new(options: GeocodrOptions) -> Self {
        Self::with_metadata(options, Self::default_metadata())
    }

    /// Create the plugin under a different identity
    pub fn with_metadata(options: GeocodrOptions, metadata: PluginMetadata) -> Self {
        Self {
            metadata,
            options,
            instance: None,
        }
    }

    pub fn default_metadata() -> PluginMetadata {
        PluginMetadata::new(PLUGIN_NAME, PLUGIN_VERSION, MAP_VERSION)
    }

    /// The registered provider, once initialized
    pub fn instance(&self) -> Option<&Arc<Geocodr>> {
        self.instance.as_ref()
    }
}

impl Plugin for SearchGeocodrPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn initialize(&mut self, app: &mut App) -> Result<(), DomainError> {
        if self.instance.is_some() {
            return Err(DomainError::Conflict(format!(
                "Plugin '{}' is already initialized",
                self.metadata.name
            )));
        }

        let provider = Arc::new(Geocodr::new(&self.options)?.with_name(&self.metadata.name));
        app.search.add(provider.clone(), &self.metadata.name)?;
        info!(
            plugin = %self.metadata.name,
            version = %self.metadata.version,
            "Initialized Geocodr search"
        );

        self.instance = Some(provider);
        Ok(())
    }

    fn to_json(&self) -> Result<Value, DomainError> {
        let instance = self.instance.as_ref().ok_or_else(|| {
            DomainError::Validation(format!(
                "Plugin '{}' has not been initialized",
                self.metadata.name
            ))
        })?;

        let config = instance.to_config();
        debug!(plugin = %self.metadata.name, "Serializing plugin configuration");
        serde_json::to_value(config)
            .map_err(|e| DomainError::Validation(format!("Failed to serialize config: {}", e)))
    }

    fn get_default_options(&self) -> Value {
        serde_json::to_value(Geocodr::get_default_options()).unwrap_or(Value::Null)
    }

    fn get_config_editors(&self) -> Vec<ConfigEditor> {
        vec![ConfigEditor::new(CONFIG_EDITOR_COMPONENT)]
    }

    fn i18n(&self) -> I18nDictionary {
        crate::i18n::dictionary()
    }
}
