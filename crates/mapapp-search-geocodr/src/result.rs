//! Geocodr response parsing and result item construction

use mapapp::{Feature, Geometry, InfoView, ResultItem};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Name of the info view attached to every result
pub const INFO_VIEW_NAME: &str = "GeocodrInfo";
/// UI component rendering the result balloon
pub const BALLOON_COMPONENT: &str = "SearchGeocodrBalloon";

const TITLE_PROPERTY: &str = "_title_";
const BALLOON_TITLE_PROPERTY: &str = "suchklasse";
const BALLOON_SUBTITLE_PROPERTY: &str = "objektgruppe";

/// Response body of a Geocodr query
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodrResponse {
    pub features: Vec<GeocodrFeature>,
}

/// GeoJSON feature as returned by the service
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodrFeature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl GeocodrResponse {
    /// Convert every feature, keeping the service order
    pub fn into_result_items(self) -> Vec<ResultItem> {
        self.features.into_iter().map(create_result_item).collect()
    }
}

/// Map one response feature to a result item
///
/// Missing properties leave the title empty and the balloon fields unset.
pub fn create_result_item(item: GeocodrFeature) -> ResultItem {
    let title = property_text(&item.properties, TITLE_PROPERTY).unwrap_or_default();
    let info_view = InfoView::balloon(INFO_VIEW_NAME, BALLOON_COMPONENT)
        .with_title(property_text(&item.properties, BALLOON_TITLE_PROPERTY))
        .with_subtitle(property_text(&item.properties, BALLOON_SUBTITLE_PROPERTY));

    ResultItem::new(title, Feature::new(item.geometry), info_view).with_attributes(item.properties)
}

fn property_text(properties: &Map<String, Value>, key: &str) -> Option<String> {
    match properties.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> Vec<ResultItem> {
        serde_json::from_value::<GeocodrResponse>(body)
            .unwrap()
            .into_result_items()
    }

    #[test]
    fn test_map_address_feature() {
        let items = parse(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [12.13, 54.09] },
                "properties": {
                    "_title_": "Hauptstr. 1",
                    "suchklasse": "Straße",
                    "objektgruppe": "Adressen",
                    "gemeinde_name": "Rostock"
                }
            }]
        }));

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.title, "Hauptstr. 1");
        assert_eq!(item.attribute("suchklasse"), Some(&json!("Straße")));
        assert_eq!(item.attribute("gemeinde_name"), Some(&json!("Rostock")));
        assert_eq!(item.info_view.name(), INFO_VIEW_NAME);
        assert_eq!(item.info_view.title(), Some("Straße"));
        assert_eq!(item.info_view.subtitle(), Some("Adressen"));
        assert_eq!(
            item.feature.geometry,
            Some(Geometry::Point {
                coordinates: vec![12.13, 54.09]
            })
        );
    }

    #[test]
    fn test_empty_features() {
        assert!(parse(json!({ "features": [] })).is_empty());
    }

    #[test]
    fn test_missing_properties_are_tolerated() {
        let items = parse(json!({
            "features": [{ "geometry": null, "properties": { "suchklasse": null } }]
        }));

        let item = &items[0];
        assert_eq!(item.title, "");
        assert_eq!(item.info_view.title(), None);
        assert_eq!(item.info_view.subtitle(), None);
        assert!(item.feature.geometry.is_none());
        assert_eq!(item.attribute("suchklasse"), Some(&Value::Null));
    }

    #[test]
    fn test_null_properties() {
        let items = parse(json!({
            "features": [{
                "geometry": { "type": "Point", "coordinates": [12.1, 54.1] },
                "properties": null
            }]
        }));
        assert_eq!(items[0].title, "");
        assert!(items[0].attributes.is_empty());
    }

    #[test]
    fn test_numeric_title() {
        let items = parse(json!({
            "features": [{ "properties": { "_title_": 17 } }]
        }));
        assert_eq!(items[0].title, "17");
    }

    #[test]
    fn test_order_preserved() {
        let items = parse(json!({
            "features": [
                { "properties": { "_title_": "b" } },
                { "properties": { "_title_": "a" } },
                { "properties": { "_title_": "c" } }
            ]
        }));
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_missing_features_is_an_error() {
        assert!(serde_json::from_value::<GeocodrResponse>(json!({ "results": [] })).is_err());
    }
}
