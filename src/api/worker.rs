use crate::api::{QuestionSource, TagSource};
use crate::models::{ApiRequest, ApiResponse};
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Serve flow requests until the request channel closes. Each request runs on
/// its own task so a slow question fetch never holds up the tag list.
pub fn spawn_api_worker<S>(
    source: Arc<S>,
    mut requests: UnboundedReceiver<ApiRequest>,
    responses: UnboundedSender<ApiResponse>,
) -> JoinHandle<()>
where
    S: QuestionSource + TagSource + 'static,
{
    tokio::spawn(async move {
        while let Some(request) = requests.recv().await {
            debug!(?request, "Worker received request");
            let source = Arc::clone(&source);
            let responses = responses.clone();

            tokio::spawn(async move {
                let response = match request {
                    ApiRequest::LoadTags { generation } => ApiResponse::Tags {
                        generation,
                        result: source.load_tags().await,
                    },
                    ApiRequest::LoadQuestions {
                        generation,
                        context,
                    } => ApiResponse::Questions {
                        generation,
                        result: source.resolve(&context).await,
                    },
                };
                if responses.send(response).is_err() {
                    debug!("Response channel closed, dropping result");
                }
            });
        }
        info!("Worker channel disconnected, exiting");
    })
}
