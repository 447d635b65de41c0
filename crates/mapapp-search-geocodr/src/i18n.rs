//! Labels of the configuration fields, German and English

use mapapp::I18nDictionary;
use serde_json::json;

/// Namespace of the plugin's messages
pub const I18N_NAMESPACE: &str = "searchGeocodr";

pub fn dictionary() -> I18nDictionary {
    I18nDictionary::new()
        .with_locale(
            "de",
            json!({
                I18N_NAMESPACE: {
                    "name": "Name",
                    "url": "URL zu Geocodr",
                    "state": "Bundesland",
                    "city": "Stadt",
                    "countrycode": "Ländercode",
                    "limit": "Maximale Anzahl Resultate",
                    "bbox": "Bounding Box",
                }
            }),
        )
        .with_locale(
            "en",
            json!({
                I18N_NAMESPACE: {
                    "name": "Name",
                    "url": "URL to Geocodr",
                    "state": "State",
                    "city": "City",
                    "countrycode": "Country Code",
                    "limit": "Maximum number of results",
                    "bbox": "Bounding Box",
                }
            }),
        )
}

/// Dotted message key for a configuration field, e.g. `searchGeocodr.city`
///
/// The extent is labelled as `bbox`.
pub fn field_key(field: &str) -> String {
    let field = if field == "extent" { "bbox" } else { field };
    format!("{}.{}", I18N_NAMESPACE, field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_locales_complete() {
        let dict = dictionary();
        for field in ["name", "url", "state", "city", "countrycode", "limit", "bbox"] {
            let key = field_key(field);
            assert!(dict.get("de", &key).is_some(), "de {}", key);
            assert!(dict.get("en", &key).is_some(), "en {}", key);
        }
    }

    #[test]
    fn test_labels() {
        let dict = dictionary();
        assert_eq!(dict.translate("de", &field_key("city")), "Stadt");
        assert_eq!(dict.translate("en", &field_key("extent")), "Bounding Box");
        assert_eq!(dict.translate("de", &field_key("limit")), "Maximale Anzahl Resultate");
    }
}
