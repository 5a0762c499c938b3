use crate::api::{QuestionSource, TagSource};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::{
    CaptureReceipt, CaptureRequest, QueryContext, Question, QuestionsPayload, QuestionsRequest,
    Tag, TagsPayload,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

const QUESTIONS_ENDPOINT: &str = "questionsBySearchQuery";
const TAGS_ENDPOINT: &str = "tags";
const CAPTURE_ENDPOINT: &str = "data";

/// HTTP client for the recall server. Constructed explicitly from a
/// [`ClientConfig`] and shared by the flows that need it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Self::with_http_client(config, client)
    }

    /// Use a preconfigured reqwest client (proxy, TLS, ...).
    pub fn with_http_client(config: ClientConfig, client: Client) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&config.base_url)?;
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    pub async fn questions(&self, query: &str) -> Result<Vec<Question>, ApiError> {
        let url = self.endpoint(QUESTIONS_ENDPOINT)?;
        let body = QuestionsRequest {
            query,
            questions: self.config.question_count,
        };
        let payload: QuestionsPayload = self
            .execute(QUESTIONS_ENDPOINT, self.client.post(url).json(&body))
            .await?;
        Ok(payload.into_questions())
    }

    pub async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        let url = self.endpoint(TAGS_ENDPOINT)?;
        let mut request = self.client.get(url);
        if let Some(count) = self.config.tag_count {
            request = request.query(&[("count", count)]);
        }
        let payload: TagsPayload = self.execute(TAGS_ENDPOINT, request).await?;
        Ok(payload.into_tags())
    }

    /// Store a snippet on the server so later quizzes can draw on it.
    pub async fn capture(&self, content: &str, source: &str) -> Result<CaptureReceipt, ApiError> {
        let url = self.endpoint(CAPTURE_ENDPOINT)?;
        let body = CaptureRequest { content, source };
        self.execute(CAPTURE_ENDPOINT, self.client.post(url).json(&body))
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let request = self
            .config
            .interceptors
            .iter()
            .fold(request, |req, interceptor| interceptor.on_request(endpoint, req));

        let result = self.send(endpoint, request).await;
        if let Err(ref e) = result {
            for interceptor in &self.config.interceptors {
                interceptor.on_error(endpoint, e);
            }
        }
        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        for interceptor in &self.config.interceptors {
            interceptor.on_response(endpoint, status);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(endpoint, bytes = body.len(), "Decoding response");
        Ok(serde_json::from_str(&body)?)
    }
}

/// The base must end with `/` so endpoint names are appended, not substituted.
fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

#[async_trait]
impl QuestionSource for ApiClient {
    async fn resolve(&self, context: &QueryContext) -> Result<Vec<Question>, ApiError> {
        self.questions(context.value()).await
    }
}

#[async_trait]
impl TagSource for ApiClient {
    async fn load_tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.tags().await
    }
}
