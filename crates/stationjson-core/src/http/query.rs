//! FDSN station web-service query URLs

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Station service queried when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://www.orfeus-eu.org/fdsnws/station/1/query";

/// Depth of the returned hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Network,
    Station,
    Channel,
    /// Required for instrument responses
    #[default]
    Response,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Network => "network",
            Level::Station => "station",
            Level::Channel => "channel",
            Level::Response => "response",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "network" => Ok(Level::Network),
            "station" => Ok(Level::Station),
            "channel" => Ok(Level::Channel),
            "response" => Ok(Level::Response),
            other => Err(Error::Configuration {
                message: format!(
                    "Invalid level '{}' (expected network, station, channel or response)",
                    other
                ),
                source: None,
            }),
        }
    }
}

/// Builder for `fdsnws-station` query URLs
///
/// Unset parameters are left out of the URL so the service applies its own
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationQuery {
    base_url: String,
    network: Option<String>,
    station: Option<String>,
    location: Option<String>,
    channel: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    level: Level,
}

impl Default for StationQuery {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            network: None,
            station: None,
            location: None,
            channel: None,
            start_time: None,
            end_time: None,
            level: Level::default(),
        }
    }
}

impl StationQuery {
    /// Query against the default service
    pub fn new() -> Self {
        Self::default()
    }

    /// Query against a specific service endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    pub fn station(mut self, station: impl Into<String>) -> Self {
        self.station = Some(station.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    pub fn end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Render the query as a URL
    pub fn to_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| Error::Configuration {
            message: format!("Invalid base URL '{}': {}", self.base_url, e),
            source: Some(e.into()),
        })?;

        {
            let mut pairs = url.query_pairs_mut();
            let params = [
                ("net", &self.network),
                ("sta", &self.station),
                ("loc", &self.location),
                ("cha", &self.channel),
                ("starttime", &self.start_time),
                ("endtime", &self.end_time),
            ];
            for (key, value) in params {
                if let Some(value) = value {
                    pairs.append_pair(key, value);
                }
            }
            pairs.append_pair("level", self.level.as_str());
        }

        Ok(url)
    }
}
