//! Configuration options for the Todo Manager client

use std::time::Duration;

/// Configuration options for the Todo Manager client
///
/// The base endpoint itself is passed to the client constructor; these
/// options only tune how requests against it are issued.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout applied to every round trip
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }
}
