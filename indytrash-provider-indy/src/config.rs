//! Endpoint and client settings for the indy.gov backends.

use std::time::Duration;

use url::Url;

/// Address search endpoint.
pub const GEOCODE_URL: &str = "https://www.indy.gov/api/v1/search_gis_address";
/// Parcel lookup endpoint.
pub const PARCEL_URL: &str = "https://www.indy.gov/api/v1/parcel";
/// Trash pickup endpoint.
pub const SCHEDULE_URL: &str = "https://www.indy.gov/api/v1/indy_trash_pickup";
/// Per-request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("indytrash/", env!("CARGO_PKG_VERSION"));

#[derive(thiserror::Error, Debug)]
/// Invalid configuration value.
pub enum ConfigError {
    /// A URL setting could not be parsed.
    #[error("{key} is not a valid URL: {source}")]
    InvalidUrl {
        /// Setting name.
        key: &'static str,
        /// Parse failure.
        source: url::ParseError,
    },
    /// The timeout setting is not a positive number of seconds.
    #[error("{key} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout {
        /// Setting name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

#[derive(Debug, Clone)]
/// Settings for talking to the City of Indianapolis APIs.
pub struct IndyConfig {
    /// Address search endpoint.
    pub geocode_url: Url,
    /// Parcel lookup endpoint.
    pub parcel_url: Url,
    /// Trash pickup endpoint.
    pub schedule_url: Url,
    /// Timeout applied to each request.
    pub timeout: Duration,
    /// `User-Agent` header sent with each request.
    pub user_agent: String,
    /// Optional `__workflow_id` sent to the trash pickup endpoint.
    pub workflow_id: Option<String>,
}

impl Default for IndyConfig {
    fn default() -> Self {
        Self {
            geocode_url: builtin_url(GEOCODE_URL),
            parcel_url: builtin_url(PARCEL_URL),
            schedule_url: builtin_url(SCHEDULE_URL),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_owned(),
            workflow_id: None,
        }
    }
}

impl IndyConfig {
    /// Build a configuration from `INDYTRASH_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup; unset keys keep defaults.
    ///
    /// Recognised keys: `INDYTRASH_GEOCODE_URL`, `INDYTRASH_PARCEL_URL`,
    /// `INDYTRASH_SCHEDULE_URL`, `INDYTRASH_TIMEOUT_SECS`, `INDYTRASH_WORKFLOW_ID`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = parse_url(&lookup, "INDYTRASH_GEOCODE_URL")? {
            config.geocode_url = url;
        }
        if let Some(url) = parse_url(&lookup, "INDYTRASH_PARCEL_URL")? {
            config.parcel_url = url;
        }
        if let Some(url) = parse_url(&lookup, "INDYTRASH_SCHEDULE_URL")? {
            config.schedule_url = url;
        }
        if let Some(value) = lookup("INDYTRASH_TIMEOUT_SECS") {
            let key = "INDYTRASH_TIMEOUT_SECS";
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout { key, value })?;
            config.timeout = Duration::from_secs(secs);
        }
        config.workflow_id = lookup("INDYTRASH_WORKFLOW_ID").filter(|id| !id.trim().is_empty());

        Ok(config)
    }

    /// Point all three endpoints at `base`, keeping the indy.gov paths.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `base` cannot be joined with the paths.
    pub fn with_base_url(mut self, base: &Url) -> Result<Self, ConfigError> {
        let join = |builtin: &str| {
            let path = builtin_url(builtin).path().to_owned();
            base.join(&path).map_err(|source| ConfigError::InvalidUrl {
                key: "base_url",
                source,
            })
        };
        self.geocode_url = join(GEOCODE_URL)?;
        self.parcel_url = join(PARCEL_URL)?;
        self.schedule_url = join(SCHEDULE_URL)?;
        Ok(self)
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn builtin_url(raw: &str) -> Url {
    Url::parse(raw).expect("built-in endpoint URLs are valid")
}

fn parse_url<F>(lookup: &F, key: &'static str) -> Result<Option<Url>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { key, source }))
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_indy_gov() {
        let config = IndyConfig::from_lookup(lookup_from(&[])).expect("defaults are valid");

        assert_eq!(config.geocode_url.as_str(), GEOCODE_URL);
        assert_eq!(config.parcel_url.as_str(), PARCEL_URL);
        assert_eq!(config.schedule_url.as_str(), SCHEDULE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.workflow_id, None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = IndyConfig::from_lookup(lookup_from(&[
            ("INDYTRASH_PARCEL_URL", "http://localhost:9000/parcel"),
            ("INDYTRASH_TIMEOUT_SECS", "3"),
            ("INDYTRASH_WORKFLOW_ID", "c2fdbada-0999-4a55-ad3e-8552b717c1da"),
        ]))
        .expect("overrides are valid");

        assert_eq!(config.parcel_url.as_str(), "http://localhost:9000/parcel");
        assert_eq!(config.geocode_url.as_str(), GEOCODE_URL);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(
            config.workflow_id.as_deref(),
            Some("c2fdbada-0999-4a55-ad3e-8552b717c1da")
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_url = IndyConfig::from_lookup(lookup_from(&[("INDYTRASH_GEOCODE_URL", "not a url")]));
        assert!(matches!(
            bad_url,
            Err(ConfigError::InvalidUrl {
                key: "INDYTRASH_GEOCODE_URL",
                ..
            })
        ));

        let zero_timeout = IndyConfig::from_lookup(lookup_from(&[("INDYTRASH_TIMEOUT_SECS", "0")]));
        assert!(matches!(zero_timeout, Err(ConfigError::InvalidTimeout { .. })));
    }

    #[test]
    fn base_url_keeps_api_paths() {
        let base = Url::parse("http://127.0.0.1:8080").expect("valid base");
        let config = IndyConfig::default()
            .with_base_url(&base)
            .expect("joinable base");

        assert_eq!(
            config.geocode_url.as_str(),
            "http://127.0.0.1:8080/api/v1/search_gis_address"
        );
        assert_eq!(config.schedule_url.as_str(), "http://127.0.0.1:8080/api/v1/indy_trash_pickup");
    }
}
