// settings
use std::collections::HashMap;
use std::env;
use std::time::Duration;

use tracing::{info, warn};

use crate::controllers::fetcher::{
    DEFAULT_DELAY_MAX, DEFAULT_DELAY_MIN, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, FetchConfig,
};
use crate::controllers::url::DEFAULT_BASE_URL;

/// Runtime settings for the service, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub base_url: String,
    pub fetch: FetchConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            port: 8000,
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_vars(env::vars().collect())
    }

    /// Unset or unparsable values fall back to the defaults.
    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let port = parse_or(get("PORT"), "PORT", 8000u16);
        let base_url = get("LYRICS_BASE_URL").unwrap_or(DEFAULT_BASE_URL).to_string();
        let delay_min = parse_or(get("FETCH_DELAY_MIN_SECS"), "FETCH_DELAY_MIN_SECS", DEFAULT_DELAY_MIN.as_secs_f64());
        let delay_max = parse_or(get("FETCH_DELAY_MAX_SECS"), "FETCH_DELAY_MAX_SECS", DEFAULT_DELAY_MAX.as_secs_f64());
        let timeout = parse_or(get("FETCH_TIMEOUT_SECS"), "FETCH_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs_f64());
        let timeout = if timeout > 0.0 {
            timeout
        } else {
            warn!("Ignoring non-positive FETCH_TIMEOUT_SECS");
            DEFAULT_TIMEOUT.as_secs_f64()
        };
        let user_agent = get("SCRAPER_USER_AGENT").unwrap_or(DEFAULT_USER_AGENT);

        let fetch = FetchConfig::default()
            .with_delay(secs(delay_min), secs(delay_max))
            .with_timeout(secs(timeout))
            .with_user_agent(user_agent);

        // Log which settings are configured (not their values)
        let configured: Vec<&str> = [
            "PORT",
            "LYRICS_BASE_URL",
            "FETCH_DELAY_MIN_SECS",
            "FETCH_DELAY_MAX_SECS",
            "FETCH_TIMEOUT_SECS",
            "SCRAPER_USER_AGENT",
        ]
        .into_iter()
        .filter(|&k| get(k).is_some())
        .collect();
        info!("Settings configured from env: {:?}", configured);

        Settings { port, base_url, fetch }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, key: &str, default: T) -> T {
    match raw.map(str::parse::<T>) {
        Some(Ok(v)) => v,
        Some(Err(_)) => {
            warn!("Ignoring unparsable {}", key);
            default
        }
        None => default,
    }
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.max(0.0)).unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_without_env() {
        let s = Settings::from_vars(HashMap::new());
        assert_eq!(s.port, 8000);
        assert_eq!(s.base_url, "https://www.azlyrics.com");
        assert_eq!(s.fetch.delay_min, Duration::from_secs(3));
        assert_eq!(s.fetch.delay_max, Duration::from_secs(15));
        assert_eq!(s.fetch.timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_from_env() {
        let s = Settings::from_vars(vars(&[
            ("PORT", "9100"),
            ("LYRICS_BASE_URL", "http://mirror.local"),
            ("FETCH_DELAY_MIN_SECS", "0.5"),
            ("FETCH_DELAY_MAX_SECS", "2"),
            ("FETCH_TIMEOUT_SECS", "30"),
            ("SCRAPER_USER_AGENT", "test-agent"),
        ]));
        assert_eq!(s.port, 9100);
        assert_eq!(s.base_url, "http://mirror.local");
        assert_eq!(s.fetch.delay_min, Duration::from_millis(500));
        assert_eq!(s.fetch.delay_max, Duration::from_secs(2));
        assert_eq!(s.fetch.timeout, Duration::from_secs(30));
        assert_eq!(s.fetch.user_agent, "test-agent");
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let s = Settings::from_vars(vars(&[("PORT", "eighty"), ("FETCH_DELAY_MIN_SECS", "-4"), ("FETCH_TIMEOUT_SECS", "")]));
        assert_eq!(s.port, 8000);
        assert_eq!(s.fetch.delay_min, Duration::ZERO);
        assert_eq!(s.fetch.timeout, Duration::from_secs(10));
    }

    #[test]
    fn non_positive_timeout_falls_back_to_default() {
        for raw in ["0", "-3", "0.0"] {
            let s = Settings::from_vars(vars(&[("FETCH_TIMEOUT_SECS", raw)]));
            assert_eq!(s.fetch.timeout, Duration::from_secs(10), "{raw}");
        }
    }
}
