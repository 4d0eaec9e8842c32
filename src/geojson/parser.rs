use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::Event;
use crate::error::ParseError;

/// Top level of a USGS GeoJSON response. Only the feature list matters here.
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Option<Vec<Value>>,
}

/// Parse a USGS GeoJSON payload into the first event it contains.
///
/// Never fails: malformed JSON, a missing or empty `features` list, and
/// absent properties all yield [`Event::default`] or default fields.
pub fn parse_event(text: &str) -> Event {
    match try_parse_event(text) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "could not extract event from response");
            Event::default()
        }
    }
}

/// Like [`parse_event`], but reports why no feature could be found.
///
/// # Algorithm
/// 1. Parse the payload and take the first entry of `features`
/// 2. Read `properties.title`
/// 3. Read `properties.felt`, falling back to the DYFI response count
/// 4. Read `properties.cdi` as the perceived-strength label
///
/// Missing fields inside the feature default to empty or zero.
pub fn try_parse_event(text: &str) -> Result<Event, ParseError> {
    let collection: FeatureCollection = serde_json::from_str(text)?;
    let features = collection.features.ok_or(ParseError::MissingFeatures)?;
    let first = features.first().ok_or(ParseError::NoFeatures)?;

    let Some(properties) = first.get("properties") else {
        debug!("first feature has no properties");
        return Ok(Event::default());
    };

    let title = properties
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let felt = felt_count(properties);
    let strength = strength_label(properties.get("cdi"));

    debug!(
        features = features.len(),
        title,
        felt,
        strength = %strength,
        "parsed first feature"
    );

    Ok(Event::new(title, felt, strength))
}

fn felt_count(properties: &Value) -> u64 {
    match properties.get("felt") {
        Some(felt) if !felt.is_null() => count_value(felt).unwrap_or(0),
        // Detail feeds carry the DYFI response count under the product instead
        _ => properties
            .pointer("/products/dyfi/0/properties/numResp")
            .and_then(count_value)
            .unwrap_or(0),
    }
}

/// Read a non-negative count from a JSON number or numeric string.
fn count_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn strength_label(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../../fixtures/usgs_sample.json");

    #[test]
    fn test_parse_single_feature() {
        let json = r#"{
            "features": [
                {"properties": {"title": "M 5.4 - 10km N of Town", "felt": 212, "cdi": 4.1}}
            ]
        }"#;

        let event = parse_event(json);
        assert_eq!(event.title(), "M 5.4 - 10km N of Town");
        assert_eq!(event.num_of_people(), 212);
        assert_eq!(event.perceived_strength(), "4.1");
    }

    #[test]
    fn test_sample_payload_keeps_known_title() {
        let event = try_parse_event(SAMPLE).unwrap();
        assert_eq!(event.title(), "M 7.8 - 27km SSE of Muisne, Ecuador");
        assert_eq!(event.num_of_people(), 1320);
        assert_eq!(event.perceived_strength(), "8.4");
    }

    #[test]
    fn test_empty_features_yields_default() {
        let json = r#"{"type": "FeatureCollection", "features": []}"#;

        assert!(matches!(try_parse_event(json), Err(ParseError::NoFeatures)));
        assert_eq!(parse_event(json), Event::default());
    }

    #[test]
    fn test_malformed_json_yields_default() {
        let json = r#"{"features": [ {"properties": "#;

        assert!(matches!(try_parse_event(json), Err(ParseError::Json(_))));
        assert_eq!(parse_event(json), Event::default());
        assert_eq!(parse_event(""), Event::default());
    }

    #[test]
    fn test_missing_features_yields_default() {
        assert!(matches!(
            try_parse_event(r#"{"type": "FeatureCollection"}"#),
            Err(ParseError::MissingFeatures)
        ));
        assert!(parse_event("[]").is_empty());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let json = r#"{"features": [{"properties": {"title": "M 5.0 - Offshore", "felt": null}}]}"#;

        let event = parse_event(json);
        assert_eq!(event.title(), "M 5.0 - Offshore");
        assert_eq!(event.num_of_people(), 0);
        assert_eq!(event.perceived_strength(), "");

        let bare = parse_event(r#"{"features": [{"id": "abc"}]}"#);
        assert!(bare.is_empty());
    }

    #[test]
    fn test_felt_falls_back_to_dyfi_responses() {
        let json = r#"{"features": [{"properties": {
            "title": "M 6.0 - Inland",
            "products": {"dyfi": [{"properties": {"numResp": "347", "maxmmi": "6.2"}}]}
        }}]}"#;

        assert_eq!(parse_event(json).num_of_people(), 347);
    }

    #[test]
    fn test_string_and_odd_values() {
        let json = r#"{"features": [{"properties": {"title": "t", "felt": "64", "cdi": " 3.8 "}}]}"#;
        let event = parse_event(json);
        assert_eq!(event.num_of_people(), 64);
        assert_eq!(event.perceived_strength(), "3.8");

        let negative = r#"{"features": [{"properties": {"felt": -3, "cdi": 5}}]}"#;
        let event = parse_event(negative);
        assert_eq!(event.num_of_people(), 0);
        assert_eq!(event.perceived_strength(), "5");
    }
}
