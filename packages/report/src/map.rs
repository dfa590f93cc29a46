//! GeoJSON output for the recovery web map.
//!
//! One point feature per destroyed parcel, carrying the address,
//! rounded valuation, and rebuild status the renderer uses for tooltip,
//! radius, and color.

use geojson::{Feature, FeatureCollection, Geometry, Value};
use wildfire_atlas_property_models::JoinedProperty;

/// Builds a `FeatureCollection` of home points from the joined rows.
#[must_use]
pub fn homes_feature_collection(homes: &[JoinedProperty]) -> FeatureCollection {
    let features = homes.iter().map(home_feature).collect();
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn home_feature(home: &JoinedProperty) -> Feature {
    let geometry = Geometry::new(Value::Point(vec![home.longitude, home.latitude]));

    let mut properties = serde_json::Map::new();
    properties.insert(
        "address".to_owned(),
        serde_json::Value::String(home.address.clone()),
    );
    properties.insert(
        "value".to_owned(),
        serde_json::Value::from(home.assessed_value),
    );
    properties.insert(
        "status".to_owned(),
        serde_json::Value::String(home.status.to_string()),
    );

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
