use crate::app_config::AppConfig;
use crate::costs::DEFAULT_FALLBACK_COST;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("INFDASH_LOG_LEVEL", "info");
    let cost_table_path = lookup("INFDASH_COST_TABLE_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let fallback_raw = or_default("INFDASH_FALLBACK_COST", &DEFAULT_FALLBACK_COST.to_string());
    let fallback_cost = fallback_raw
        .parse::<f64>()
        .map_err(|e| invalid("INFDASH_FALLBACK_COST", e.to_string()))?;
    if !fallback_cost.is_finite() || fallback_cost <= 0.0 {
        return Err(invalid(
            "INFDASH_FALLBACK_COST",
            format!("must be a positive number, got {fallback_raw}"),
        ));
    }

    let require_influencer = parse_bool("INFDASH_REQUIRE_INFLUENCER", "false")?;
    let parallel = parse_bool("INFDASH_PARALLEL", "true")?;
    let top_n = parse_usize("INFDASH_TOP_N", "10")?;

    Ok(AppConfig {
        log_level,
        cost_table_path,
        fallback_cost,
        require_influencer,
        parallel,
        top_n,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
