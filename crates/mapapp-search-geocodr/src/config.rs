//! Geocodr configuration
//!
//! `GeocodrOptions` is the plugin configuration object as stored by the host;
//! `SearchConfiguration` is the validated form a provider works with.

use mapapp::{DomainError, Extent, ExtentOptions};
use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const DEFAULT_URL: &str = "https://geo.sv.rostock.de/geocodr/query";
pub const DEFAULT_COUNTRY_CODE: &str = "de";
pub const DEFAULT_KEY: &str = "00000000000000000000000000000000";
pub const DEFAULT_LIMIT: u32 = 20;
pub const DEFAULT_SEARCH_TYPE: &str = "search";
pub const DEFAULT_RESULT_CLASS: &str = "address";
pub const DEFAULT_OUT_EPSG: &str = "4326";

/// Plugin configuration object
///
/// Every field is optional; absent fields fall back to the defaults and are
/// omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodrOptions {
    /// Geocodr query endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Appended to every query as `,<city>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Appended to every query as `,<state>`, after the city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countrycode: Option<String>,
    /// Access key for the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Maximum number of results, must be positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
    #[serde(rename = "class", default, skip_serializing_if = "Option::is_none")]
    pub result_class: Option<String>,
    /// EPSG code of returned geometries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_epsg: Option<String>,
    /// Restricts results to this bounding box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<ExtentOptions>,
}

impl GeocodrOptions {
    /// Scalar fields settable by name
    pub const FIELDS: &'static [&'static str] = &[
        "url",
        "city",
        "state",
        "countrycode",
        "key",
        "limit",
        "type",
        "class",
        "out_epsg",
    ];

    /// Canonical default values
    pub fn defaults() -> Self {
        Self {
            url: Some(DEFAULT_URL.to_string()),
            city: None,
            state: None,
            countrycode: Some(DEFAULT_COUNTRY_CODE.to_string()),
            key: Some(DEFAULT_KEY.to_string()),
            limit: Some(DEFAULT_LIMIT),
            search_type: Some(DEFAULT_SEARCH_TYPE.to_string()),
            result_class: Some(DEFAULT_RESULT_CLASS.to_string()),
            out_epsg: Some(DEFAULT_OUT_EPSG.to_string()),
            extent: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_extent(mut self, extent: ExtentOptions) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Set a scalar field by its configuration name; `None` clears it
    pub fn set(&mut self, field: &str, value: Option<String>) -> Result<(), DomainError> {
        match field {
            "url" => self.url = value,
            "city" => self.city = value,
            "state" => self.state = value,
            "countrycode" => self.countrycode = value,
            "key" => self.key = value,
            "limit" => {
                self.limit = value
                    .map(|v| {
                        v.trim().parse::<u32>().map_err(|_| {
                            DomainError::Validation(format!("limit must be a number, got '{}'", v))
                        })
                    })
                    .transpose()?
            }
            "type" => self.search_type = value,
            "class" => self.result_class = value,
            "out_epsg" => self.out_epsg = value,
            other => {
                return Err(DomainError::Validation(format!(
                    "Unknown option '{}', expected one of: {}",
                    other,
                    Self::FIELDS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

/// Validated search settings of one provider instance
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfiguration {
    pub url: Url,
    pub city: Option<String>,
    pub state: Option<String>,
    pub countrycode: String,
    pub key: String,
    pub extent: Option<Extent>,
    pub limit: u32,
    pub search_type: String,
    pub result_class: String,
    pub out_epsg: String,
}

impl SearchConfiguration {
    /// Merge `options` over the defaults and validate the result
    pub fn from_options(options: &GeocodrOptions) -> Result<Self, DomainError> {
        let pick = |value: &Option<String>, default: &str| {
            value.clone().unwrap_or_else(|| default.to_string())
        };
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());

        let raw_url = options.url.as_deref().unwrap_or(DEFAULT_URL);
        let url = Url::parse(raw_url)
            .map_err(|e| DomainError::Validation(format!("Invalid url '{}': {}", raw_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::Validation(format!(
                "Invalid url '{}': expected http or https",
                raw_url
            )));
        }

        let limit = options.limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 {
            return Err(DomainError::Validation(
                "limit must be greater than 0".to_string(),
            ));
        }

        let extent = options.extent.as_ref().map(Extent::from_options).transpose()?;

        Ok(Self {
            url,
            city: non_empty(&options.city),
            state: non_empty(&options.state),
            countrycode: pick(&options.countrycode, DEFAULT_COUNTRY_CODE),
            key: pick(&options.key, DEFAULT_KEY),
            extent,
            limit,
            search_type: pick(&options.search_type, DEFAULT_SEARCH_TYPE),
            result_class: pick(&options.result_class, DEFAULT_RESULT_CLASS),
            out_epsg: pick(&options.out_epsg, DEFAULT_OUT_EPSG),
        })
    }

    /// Options holding only what differs from the defaults
    pub fn to_options(&self) -> GeocodrOptions {
        let differs = |value: &str, default: &str| (value != default).then(|| value.to_string());

        GeocodrOptions {
            url: differs(self.url.as_str(), DEFAULT_URL),
            city: self.city.clone(),
            state: self.state.clone(),
            countrycode: differs(&self.countrycode, DEFAULT_COUNTRY_CODE),
            key: differs(&self.key, DEFAULT_KEY),
            limit: (self.limit != DEFAULT_LIMIT).then_some(self.limit),
            search_type: differs(&self.search_type, DEFAULT_SEARCH_TYPE),
            result_class: differs(&self.result_class, DEFAULT_RESULT_CLASS),
            out_epsg: differs(&self.out_epsg, DEFAULT_OUT_EPSG),
            extent: self.extent.as_ref().map(Extent::to_options),
        }
    }
}
