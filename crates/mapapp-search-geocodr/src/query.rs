//! Query parameters of a Geocodr request

use reqwest::Url;

use crate::config::SearchConfiguration;

/// Parameters of one search request, in the order they are sent
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pairs: Vec<(&'static str, String)>,
}

impl SearchParams {
    /// Build the parameters for `text` under `config`
    ///
    /// City and state qualify the free text in that order. A configured
    /// extent adds `viewbox` (WGS84, `minlon,minlat,maxlon,maxlat`) and
    /// `bounded=1`.
    pub fn new(text: &str, config: &SearchConfiguration) -> Self {
        let mut query = text.to_string();
        for qualifier in [&config.city, &config.state].into_iter().flatten() {
            query.push(',');
            query.push_str(qualifier);
        }

        let mut pairs = vec![
            ("query", query),
            ("countrycodes", config.countrycode.clone()),
            ("format", "json".to_string()),
            ("polygon_geojson", "1".to_string()),
            ("addressdetails", "1".to_string()),
            ("limit", config.limit.to_string()),
            ("key", config.key.clone()),
            ("type", config.search_type.clone()),
            ("class", config.result_class.clone()),
            ("out_epsg", config.out_epsg.clone()),
        ];

        if let Some(extent) = &config.extent {
            let viewbox = extent
                .coordinates_in_wgs84()
                .iter()
                .map(f64::to_string)
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("viewbox", viewbox));
            pairs.push(("bounded", "1".to_string()));
        }

        Self { pairs }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// `base` with its query string replaced by these parameters
    pub fn apply_to(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())));
        url
    }
}
