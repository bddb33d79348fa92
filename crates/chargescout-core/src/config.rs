use crate::app_config::{AppConfig, CandidateStrategy};
use crate::{validate_resolution, ConfigError};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function, so parsing and validation can be tested with a pure `HashMap`
/// lookup instead of process-global env mutation.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let bind_addr = parse_addr("CHARGESCOUT_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("CHARGESCOUT_LOG_LEVEL", "info");
    let stations_path = PathBuf::from(or_default(
        "CHARGESCOUT_STATIONS_PATH",
        "./data/stations.csv",
    ));
    let boundaries_path = PathBuf::from(or_default(
        "CHARGESCOUT_BOUNDARIES_PATH",
        "./data/regions.geojson",
    ));
    let region_id_property = or_default("CHARGESCOUT_REGION_ID_PROPERTY", "name");

    let strategy = match or_default("CHARGESCOUT_STRATEGY", "grid").as_str() {
        "grid" => {
            let resolution = parse_u32("CHARGESCOUT_GRID_RESOLUTION", "100")?;
            validate_resolution(resolution).map_err(|e| ConfigError::InvalidEnvVar {
                var: "CHARGESCOUT_GRID_RESOLUTION".to_string(),
                reason: e.to_string(),
            })?;
            CandidateStrategy::Grid { resolution }
        }
        "hex" => {
            let raw = parse_u32("CHARGESCOUT_HEX_RESOLUTION", "6")?;
            let resolution = u8::try_from(raw)
                .ok()
                .and_then(|r| h3o::Resolution::try_from(r).ok())
                .ok_or_else(|| ConfigError::InvalidEnvVar {
                    var: "CHARGESCOUT_HEX_RESOLUTION".to_string(),
                    reason: format!("{raw} is not a valid H3 resolution (0-15)"),
                })?;
            CandidateStrategy::Hex { resolution }
        }
        other => {
            return Err(ConfigError::InvalidEnvVar {
                var: "CHARGESCOUT_STRATEGY".to_string(),
                reason: format!("expected 'grid' or 'hex', got '{other}'"),
            })
        }
    };

    Ok(AppConfig {
        bind_addr,
        log_level,
        stations_path,
        boundaries_path,
        region_id_property,
        strategy,
    })
}
