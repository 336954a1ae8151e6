use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_GEOSERVICE_URL: &str = "https://services1.arcgis.com/RbMX0mRVOFNTdLzd/arcgis/rest/services/MaineDIFW_DeerWinteringAreas/FeatureServer/0/query";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub geoservice: GeoServiceConfig,
    pub server: ServerConfig,
    pub map: MapConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeoServiceConfig {
    pub url: String,
    pub where_clause: String,
    pub out_fields: String,
    pub geometry_precision: u32,
    pub out_sr: String,
    /// Feature property holding the town name, if the layer carries one.
    pub town_field: String,
    pub timeout_secs: u64,
}

impl Default for GeoServiceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GEOSERVICE_URL.to_string(),
            where_clause: "1=1".to_string(),
            out_fields: "*".to_string(),
            geometry_precision: 6,
            out_sr: "4326".to_string(),
            town_field: "TOWN".to_string(),
            timeout_secs: 60,
        }
    }
}

impl GeoServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    pub style: String,
    pub zoom: f64,
    /// Used only when there are no areas to centre on.
    pub center_lat: f64,
    pub center_lon: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            style: "carto-positron".to_string(),
            zoom: 7.0,
            center_lat: 45.25,
            center_lon: -69.0,
        }
    }
}

/// Load `config/dashboard.{toml,yaml,json}` if present; every key has a default.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .build()?;

    app_config_from(settings)
}

fn app_config_from(settings: config::Config) -> anyhow::Result<AppConfig> {
    let config: AppConfig = settings.try_deserialize()?;
    anyhow::ensure!(
        config.geoservice.timeout_secs > 0,
        "geoservice.timeout_secs must be greater than 0"
    );
    Ok(config)
}
