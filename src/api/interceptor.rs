use crate::error::ApiError;
use reqwest::{RequestBuilder, StatusCode};
use tracing::{debug, warn};

/// Hooks run around every request the [`ApiClient`](super::ApiClient) makes.
pub trait Interceptor: Send + Sync {
    fn on_request(&self, _endpoint: &str, request: RequestBuilder) -> RequestBuilder {
        request
    }

    fn on_response(&self, _endpoint: &str, _status: StatusCode) {}

    fn on_error(&self, _endpoint: &str, _error: &ApiError) {}
}

/// Logs each exchange. Installed by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInterceptor;

impl Interceptor for TracingInterceptor {
    fn on_request(&self, endpoint: &str, request: RequestBuilder) -> RequestBuilder {
        debug!(endpoint, "Sending request");
        request
    }

    fn on_response(&self, endpoint: &str, status: StatusCode) {
        debug!(endpoint, status = status.as_u16(), "Received response");
    }

    fn on_error(&self, endpoint: &str, error: &ApiError) {
        warn!(endpoint, error = %error, "Request failed");
    }
}

/// Adds a fixed header to every request, e.g. an API token.
#[derive(Debug, Clone)]
pub struct HeaderInterceptor {
    name: String,
    value: String,
}

impl HeaderInterceptor {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Interceptor for HeaderInterceptor {
    fn on_request(&self, _endpoint: &str, request: RequestBuilder) -> RequestBuilder {
        request.header(self.name.as_str(), self.value.as_str())
    }
}
