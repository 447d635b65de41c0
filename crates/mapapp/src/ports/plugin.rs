//! Plugin Port
//!
//! Contract between the host application and its plugins.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app::App;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::I18nDictionary;

/// Identity of a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    pub name: String,
    pub version: String,
    /// Host version range the plugin was built against
    pub map_version: String,
}

impl PluginMetadata {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        map_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            map_version: map_version.into(),
        }
    }
}

/// Configuration editor offered by a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEditor {
    /// UI component rendering the editor
    pub component: String,
}

impl ConfigEditor {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }
}

/// Plugin interface
pub trait Plugin: Send + Sync {
    fn metadata(&self) -> &PluginMetadata;

    fn name(&self) -> &str {
        &self.metadata().name
    }

    fn version(&self) -> &str {
        &self.metadata().version
    }

    fn map_version(&self) -> &str {
        &self.metadata().map_version
    }

    /// Hook the plugin into the application
    fn initialize(&mut self, app: &mut App) -> Result<(), DomainError>;

    /// Current configuration, reduced to what differs from the defaults
    fn to_json(&self) -> Result<Value, DomainError>;

    fn get_default_options(&self) -> Value;

    fn get_config_editors(&self) -> Vec<ConfigEditor> {
        Vec::new()
    }

    fn i18n(&self) -> I18nDictionary {
        I18nDictionary::default()
    }
}
