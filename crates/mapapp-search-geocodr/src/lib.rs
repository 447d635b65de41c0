//! Geocodr Search for the Map Application
//!
//! This crate provides an address search provider backed by a Geocodr
//! service, together with the plugin registering it with the host.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mapapp::{App, Plugin};
//! use mapapp_search_geocodr::{GeocodrOptions, SearchGeocodrPlugin};
//!
//! let options = GeocodrOptions::default().with_city("Rostock");
//! let mut plugin = SearchGeocodrPlugin::new(options);
//! plugin.initialize(&mut app)?;
//! ```

mod client;
mod config;
mod i18n;
mod plugin;
mod provider;
mod query;
mod result;
#[cfg(test)]
mod test_support;

pub use client::GeocodrClient;
pub use config::{
    GeocodrOptions, SearchConfiguration, DEFAULT_COUNTRY_CODE, DEFAULT_KEY, DEFAULT_LIMIT,
    DEFAULT_OUT_EPSG, DEFAULT_RESULT_CLASS, DEFAULT_SEARCH_TYPE, DEFAULT_URL,
};
pub use i18n::{dictionary as i18n_dictionary, field_key, I18N_NAMESPACE};
pub use plugin::{
    SearchGeocodrPlugin, CONFIG_EDITOR_COMPONENT, MAP_VERSION, PLUGIN_NAME, PLUGIN_VERSION,
};
pub use provider::{Geocodr, PROVIDER_NAME};
pub use query::SearchParams;
pub use result::{
    create_result_item, GeocodrFeature, GeocodrResponse, BALLOON_COMPONENT, INFO_VIEW_NAME,
};
