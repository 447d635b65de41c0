//! I18n - localized message dictionaries contributed by plugins

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

const FALLBACK_LOCALE: &str = "en";

/// Messages keyed by locale, each a nested object of namespaces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct I18nDictionary(BTreeMap<String, Value>);

impl I18nDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the messages of one locale
    pub fn with_locale(mut self, locale: impl Into<String>, messages: Value) -> Self {
        self.0.insert(locale.into(), messages);
        self
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Look up a dotted key such as `searchGeocodr.url`
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(self.0.get(locale)?, |node, part| node.get(part))?
            .as_str()
    }

    /// Translate with fallback to English, then to the key itself
    pub fn translate<'a>(&'a self, locale: &str, key: &'a str) -> &'a str {
        self.get(locale, key)
            .or_else(|| self.get(FALLBACK_LOCALE, key))
            .unwrap_or(key)
    }
}
