//! Network access for the directory.
//!
//! [`UserSource`] is the seam between the loader and the outside world.
//! [`HttpUserSource`] is the production implementation: one blocking `GET`
//! against a fixed endpoint, decoded as a JSON array of [`User`]s.
use crate::error::LoadFailure;
use crate::model::User;

/// Endpoint the directory is loaded from.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Something that can produce the full list of users in one call.
pub trait UserSource: Send + 'static {
    fn fetch_users(&self) -> Result<Vec<User>, LoadFailure>;

    /// Short description used in log lines.
    fn describe(&self) -> String {
        String::from("user source")
    }
}

pub struct HttpUserSource {
    endpoint: String,
    client: Option<reqwest::blocking::Client>,
}

impl HttpUserSource {
    /// Source that builds a default client (no request timeout) on first use.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: None,
        }
    }

    /// Source that uses a caller-provided client, e.g. one with proxies disabled.
    pub fn with_client(endpoint: impl Into<String>, client: reqwest::blocking::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Some(client),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_client() -> Result<reqwest::blocking::Client, LoadFailure> {
        // A stalled endpoint keeps the UI in the loading state indefinitely.
        reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| LoadFailure::Network(format!("failed to build HTTP client: {e}")))
    }
}

impl UserSource for HttpUserSource {
    fn fetch_users(&self) -> Result<Vec<User>, LoadFailure> {
        let owned;
        let client = match &self.client {
            Some(c) => c,
            None => {
                owned = Self::build_client()?;
                &owned
            }
        };

        let response = client.get(&self.endpoint).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadFailure::Status(status.as_u16()));
        }
        let body = response.text()?;
        let users = serde_json::from_str::<Vec<User>>(&body)?;
        Ok(users)
    }

    fn describe(&self) -> String {
        format!("GET {}", self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_source_keeps_endpoint() {
        let src = HttpUserSource::new(DEFAULT_ENDPOINT);
        assert_eq!(src.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(src.describe(), format!("GET {DEFAULT_ENDPOINT}"));
    }

    #[test]
    fn invalid_url_is_a_network_failure() {
        let src = HttpUserSource::new("not a url");
        let err = src.fetch_users().unwrap_err();
        assert!(matches!(err, LoadFailure::Network(_)), "got {err:?}");
    }
}
