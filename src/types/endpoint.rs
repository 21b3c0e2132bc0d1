use serde::{Deserialize, Serialize};

use crate::error::PlayerError;

/// Built-in stream endpoints, in fallback priority order.
///
/// All ten point at the same station through different paths and schemes.
pub const DEFAULT_ENDPOINTS: [&str; 10] = [
    "https://cast5.asurahosting.com:2199/proxy/telugunr?mp=/stream",
    "http://cast5.asurahosting.com:2199/proxy/telugunr?mp=/stream",
    "https://cast5.asurahosting.com:2199/stream/telugunr",
    "http://cast5.asurahosting.com:2199/stream/telugunr",
    "https://cast5.asurahosting.com:2199/proxy/telugunr/;stream/1",
    "http://cast5.asurahosting.com:2199/proxy/telugunr/;stream/1",
    "https://cast5.asurahosting.com:2199/telugunr",
    "http://cast5.asurahosting.com:2199/telugunr",
    "https://cast5.asurahosting.com:2199/telugunr.mp3",
    "http://cast5.asurahosting.com:2199/telugunr.mp3",
];

/// Ordered, non-empty list of equivalent stream URIs
///
/// Order is fallback priority. The list cannot be modified once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct EndpointList(Vec<String>);

impl EndpointList {
    /// Build an endpoint list
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `uris` is empty or contains a blank entry
    pub fn new<I, S>(uris: I) -> Result<Self, PlayerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let uris: Vec<String> = uris.into_iter().map(Into::into).collect();

        if uris.is_empty() {
            return Err(PlayerError::InvalidConfig {
                message: "endpoint list is empty".to_string(),
            });
        }
        if let Some(pos) = uris.iter().position(|u| u.trim().is_empty()) {
            return Err(PlayerError::InvalidConfig {
                message: format!("endpoint {pos} is blank"),
            });
        }

        Ok(Self(uris))
    }

    /// Number of endpoints
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no endpoints
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Endpoint at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Index of the final endpoint
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.0.len() - 1
    }

    /// Check if `index` is the final endpoint
    #[must_use]
    pub fn is_last(&self, index: usize) -> bool {
        index >= self.last_index()
    }

    /// Iterate in priority order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for EndpointList {
    fn default() -> Self {
        Self(DEFAULT_ENDPOINTS.iter().map(ToString::to_string).collect())
    }
}

impl TryFrom<Vec<String>> for EndpointList {
    type Error = PlayerError;

    fn try_from(uris: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(uris)
    }
}

impl From<EndpointList> for Vec<String> {
    fn from(list: EndpointList) -> Self {
        list.0
    }
}
