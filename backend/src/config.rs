use log::{info, warn};
use std::{env, fmt::Display, str::FromStr};

pub struct Config {
    pub host: String,
    pub port: u16,
    /// Largest accepted KML upload or form field, also the JSON body limit.
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl Config {
    /// Reads `CROPFIELD_*` environment variables, keeping the default for any
    /// variable that is missing or does not parse.
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            host: try_load("CROPFIELD_HOST", defaults.host),
            port: try_load("CROPFIELD_PORT", defaults.port),
            max_upload_bytes: try_load("CROPFIELD_MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_values_fall_back_to_default() {
        env::set_var("CROPFIELD_TEST_PORT", "not-a-port");
        assert_eq!(try_load("CROPFIELD_TEST_PORT", 8080u16), 8080);
        env::set_var("CROPFIELD_TEST_PORT", " 9090 ");
        assert_eq!(try_load("CROPFIELD_TEST_PORT", 8080u16), 9090);
        env::remove_var("CROPFIELD_TEST_PORT");
    }

    #[test]
    fn missing_values_use_default() {
        assert_eq!(
            try_load("CROPFIELD_TEST_NEVER_SET", "fallback".to_string()),
            "fallback"
        );
    }
}
