pub mod client;
pub mod interceptor;
#[cfg(test)]
pub(crate) mod mock_server;
pub mod worker;

use crate::error::ApiError;
use crate::models::{QueryContext, Question, Tag};
use async_trait::async_trait;

// Public API exports
pub use client::ApiClient;
pub use interceptor::{HeaderInterceptor, Interceptor, TracingInterceptor};
pub use worker::spawn_api_worker;

/// Turns a query into the questions to ask.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn resolve(&self, context: &QueryContext) -> Result<Vec<Question>, ApiError>;
}

/// Lists the tags a user can pick from.
#[async_trait]
pub trait TagSource: Send + Sync {
    async fn load_tags(&self) -> Result<Vec<Tag>, ApiError>;
}
