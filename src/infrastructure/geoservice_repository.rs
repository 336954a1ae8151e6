// ArcGIS GeoService repository implementation
use crate::application::area_source::WinteringAreaSource;
use crate::domain::wintering_area::AreaFeature;
use crate::infrastructure::config::GeoServiceConfig;
use async_trait::async_trait;
use geo::{Centroid, GeodesicArea, Geometry, MultiPolygon};
use geojson::{Feature, GeoJson, feature::Id};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoServiceError {
    #[error("GeoService request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("GeoService returned an error ({code}): {message}")]
    Service { code: u16, message: String },
    #[error("GeoService response is malformed: {0}")]
    DataFormat(String),
}

/// ArcGIS reports query failures as a 200 with an `error` object instead of features.
#[derive(Debug, Deserialize)]
struct ArcGisError {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GeoServiceRepository {
    config: GeoServiceConfig,
    client: reqwest::Client,
}

impl GeoServiceRepository {
    pub fn new(config: GeoServiceConfig) -> Result<Self, GeoServiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(GeoServiceError::Network)?;

        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: GeoServiceConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn build_query_url(&self) -> String {
        format!(
            "{}?where={}&outFields={}&geometryPrecision={}&outSR={}&f=geojson",
            self.config.url.trim_end_matches('?'),
            urlencoding::encode(&self.config.where_clause),
            urlencoding::encode(&self.config.out_fields),
            self.config.geometry_precision,
            urlencoding::encode(&self.config.out_sr),
        )
    }

    async fn execute_query(&self) -> Result<Value, GeoServiceError> {
        let url = self.build_query_url();
        tracing::info!(%url, "Querying GeoService, this may take a moment");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/geo+json, application/json")
            .send()
            .await
            .map_err(GeoServiceError::Network)?;

        tracing::info!(http_status_code = ?response.status(), "Got GeoService response");

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GeoServiceError::Service {
                code: status.as_u16(),
                message: body,
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                GeoServiceError::DataFormat(e.to_string())
            } else {
                GeoServiceError::Network(e)
            }
        })
    }
}

#[async_trait]
impl WinteringAreaSource for GeoServiceRepository {
    async fn fetch_areas(&self) -> anyhow::Result<Vec<AreaFeature>> {
        let body = self.execute_query().await?;
        Ok(parse_features(body, &self.config.town_field)?)
    }
}

/// Turn a GeoService response body into area features.
///
/// The upstream schema is not versioned, so features without a usable
/// polygon are skipped rather than failing the whole load. A non-empty
/// collection with no usable polygon at all is a format error.
pub fn parse_features(body: Value, town_field: &str) -> Result<Vec<AreaFeature>, GeoServiceError> {
    if let Some(error) = body.get("error") {
        let error: ArcGisError = serde_json::from_value(error.clone())
            .map_err(|e| GeoServiceError::DataFormat(format!("unreadable error object: {e}")))?;
        let mut message = error.message.unwrap_or_else(|| "unknown error".to_string());
        if !error.details.is_empty() {
            message = format!("{message} ({})", error.details.join("; "));
        }
        return Err(GeoServiceError::Service {
            code: error.code.unwrap_or(0),
            message,
        });
    }

    if exceeded_transfer_limit(&body) {
        tracing::warn!("GeoService truncated the result set (exceededTransferLimit), some areas are missing");
    }

    let collection = match GeoJson::from_json_value(body) {
        Ok(GeoJson::FeatureCollection(fc)) => fc,
        Ok(_) => {
            return Err(GeoServiceError::DataFormat(
                "expected a GeoJSON FeatureCollection".to_string(),
            ));
        }
        Err(e) => return Err(GeoServiceError::DataFormat(e.to_string())),
    };

    let total = collection.features.len();
    let features: Vec<AreaFeature> = collection
        .features
        .into_iter()
        .enumerate()
        .filter_map(|(index, feature)| to_area_feature(index, feature, town_field))
        .collect();

    if total > 0 && features.is_empty() {
        return Err(GeoServiceError::DataFormat(format!(
            "none of the {total} features has polygon geometry"
        )));
    }

    if features.len() < total {
        tracing::warn!(
            skipped = total - features.len(),
            total,
            "Skipped features without usable polygon geometry"
        );
    }

    Ok(features)
}

fn exceeded_transfer_limit(body: &Value) -> bool {
    let flag = |v: Option<&Value>| v.and_then(Value::as_bool).unwrap_or(false);
    flag(body.get("exceededTransferLimit"))
        || flag(body.get("properties").and_then(|p| p.get("exceededTransferLimit")))
}

fn to_area_feature(index: usize, feature: Feature, town_field: &str) -> Option<AreaFeature> {
    let id = feature_id(index, &feature);

    let Some(geometry) = feature.geometry else {
        tracing::debug!(%id, "Feature has no geometry");
        return None;
    };

    let polygons = match Geometry::<f64>::try_from(geometry.value) {
        Ok(Geometry::Polygon(p)) => MultiPolygon::new(vec![p]),
        Ok(Geometry::MultiPolygon(mp)) => mp,
        Ok(_) => {
            tracing::debug!(%id, "Feature geometry is not polygonal");
            return None;
        }
        Err(e) => {
            tracing::debug!(%id, error = %e, "Feature geometry could not be converted");
            return None;
        }
    };

    let area_km2 = polygons.geodesic_area_unsigned() / 1_000_000.0;
    let centroid = polygons.centroid()?;
    if !area_km2.is_finite() || !centroid.x().is_finite() || !centroid.y().is_finite() {
        tracing::debug!(%id, "Feature has degenerate geometry");
        return None;
    }

    let town = feature
        .properties
        .as_ref()
        .and_then(|props| props.get(town_field))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(AreaFeature::new(id, town, area_km2, centroid))
}

fn feature_id(index: usize, feature: &Feature) -> String {
    match &feature.id {
        Some(Id::String(s)) => return s.clone(),
        Some(Id::Number(n)) => return n.to_string(),
        None => {}
    }

    match feature.property("OBJECTID") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => index.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;

    fn square(lon: f64, lat: f64, size: f64) -> Value {
        json!([[
            [lon, lat],
            [lon + size, lat],
            [lon + size, lat + size],
            [lon, lat + size],
            [lon, lat]
        ]])
    }

    fn collection() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": 17,
                    "geometry": { "type": "Polygon", "coordinates": square(-69.01, 45.0, 0.01) },
                    "properties": { "OBJECTID": 17, "TOWN": "Greenville" }
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [square(-70.0, 44.0, 0.05), square(-70.1, 44.0, 0.05)]
                    },
                    "properties": { "OBJECTID": 18, "TOWN": "  " }
                },
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": { "OBJECTID": 19 }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-69.0, 45.0] },
                    "properties": { "OBJECTID": 20 }
                }
            ]
        })
    }

    #[test]
    fn test_parse_feature_collection() {
        let features = parse_features(collection(), "TOWN").unwrap();
        assert_eq!(features.len(), 2);

        let first = &features[0];
        assert_eq!(first.id, "17");
        assert_eq!(first.town.as_deref(), Some("Greenville"));
        // 0.01° square at 45°N is roughly 1.11 km by 0.79 km
        assert!(first.area_km2 > 0.8 && first.area_km2 < 0.95, "area was {}", first.area_km2);
        assert!((first.centroid.x() - (-69.005)).abs() < 1e-9);
        assert!((first.centroid.y() - 45.005).abs() < 1e-9);

        let second = &features[1];
        assert_eq!(second.id, "18");
        assert_eq!(second.town, None);
        assert!(second.area_km2 > 2.0 * first.area_km2);
    }

    #[test]
    fn test_arcgis_error_body() {
        let body = json!({
            "error": { "code": 400, "message": "Invalid query", "details": ["'where' parameter is invalid"] }
        });
        match parse_features(body, "TOWN") {
            Err(GeoServiceError::Service { code, message }) => {
                assert_eq!(code, 400);
                assert!(message.contains("Invalid query"));
                assert!(message.contains("'where' parameter is invalid"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_not_a_feature_collection() {
        let feature = json!({
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": square(-69.0, 45.0, 0.01) },
            "properties": {}
        });
        assert!(matches!(
            parse_features(feature, "TOWN"),
            Err(GeoServiceError::DataFormat(_))
        ));
        assert!(matches!(
            parse_features(json!({ "count": 3 }), "TOWN"),
            Err(GeoServiceError::DataFormat(_))
        ));
    }

    #[test]
    fn test_collection_without_polygons() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-69.0, 45.0] },
                    "properties": { "OBJECTID": 1 }
                },
                { "type": "Feature", "geometry": null, "properties": { "OBJECTID": 2 } }
            ]
        });
        assert!(matches!(
            parse_features(body, "TOWN"),
            Err(GeoServiceError::DataFormat(_))
        ));
    }

    #[test]
    fn test_empty_collection() {
        let body = json!({ "type": "FeatureCollection", "features": [] });
        assert!(parse_features(body, "TOWN").unwrap().is_empty());
    }

    #[test]
    fn test_truncated_collection_still_parses() {
        let mut body = collection();
        body["properties"] = json!({ "exceededTransferLimit": true });
        assert!(exceeded_transfer_limit(&body));
        assert_eq!(parse_features(body, "TOWN").unwrap().len(), 2);
    }

    #[test]
    fn test_build_query_url() {
        let repo = GeoServiceRepository::new(GeoServiceConfig::default()).unwrap();
        let url = repo.build_query_url();

        assert!(url.ends_with("/FeatureServer/0/query?where=1%3D1&outFields=%2A&geometryPrecision=6&outSR=4326&f=geojson"));
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/query")
    }

    fn repository(url: String) -> GeoServiceRepository {
        let config = GeoServiceConfig {
            url,
            ..GeoServiceConfig::default()
        };
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap();
        GeoServiceRepository::with_client(config, client)
    }

    #[tokio::test]
    async fn test_fetch_areas_from_service() {
        let url = serve(Router::new().route("/query", get(|| async { Json(collection()) }))).await;
        let features = repository(url).fetch_areas().await.unwrap();
        assert_eq!(features.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_areas_http_failure() {
        let url = serve(Router::new().route(
            "/query",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        ))
        .await;

        let err = repository(url).fetch_areas().await.unwrap_err();
        match err.downcast_ref::<GeoServiceError>() {
            Some(GeoServiceError::Service { code, message }) => {
                assert_eq!(*code, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_areas_malformed_body() {
        let url = serve(Router::new().route("/query", get(|| async { "<html>not json</html>" }))).await;

        let err = repository(url).fetch_areas().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GeoServiceError>(),
            Some(GeoServiceError::DataFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_areas_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = repository(format!("http://{addr}/query")).fetch_areas().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GeoServiceError>(),
            Some(GeoServiceError::Network(_))
        ));
    }
}
