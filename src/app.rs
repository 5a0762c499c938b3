use crate::models::{ApiRequest, ApiResponse, AppState, QueryContext};
use crate::quiz::QuizFlow;
use crate::selection::SelectionFlow;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

/// Top-level application state: which screen is active, the flows behind each
/// screen, and the channel used to ask the worker for data.
#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub selection: SelectionFlow,
    pub quiz: Option<QuizFlow>,
    pub should_quit: bool,
    next_generation: u64,
    api_tx: Option<UnboundedSender<ApiRequest>>,
}

impl App {
    pub fn new(api_tx: Option<UnboundedSender<ApiRequest>>) -> Self {
        Self {
            state: AppState::Selection,
            selection: SelectionFlow::new(),
            quiz: None,
            should_quit: false,
            next_generation: 0,
            api_tx,
        }
    }

    fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    fn send(&self, request: ApiRequest) {
        match &self.api_tx {
            Some(tx) => {
                if tx.send(request).is_err() {
                    error!("API worker is gone; request dropped");
                }
            }
            None => debug!(?request, "No API worker attached"),
        }
    }

    /// Show a fresh search form and fetch its tags.
    pub fn activate_selection(&mut self) {
        let generation = self.bump_generation();
        self.selection = SelectionFlow::new();
        self.selection.begin_tag_load(generation);
        self.quiz = None;
        self.state = AppState::Selection;
        self.send(ApiRequest::LoadTags { generation });
    }

    /// Hand a submitted context to a new quiz activation.
    pub fn start_quiz(&mut self, context: QueryContext) {
        let generation = self.bump_generation();
        self.quiz = Some(QuizFlow::new(context.clone(), generation));
        self.state = AppState::Quiz;
        self.send(ApiRequest::LoadQuestions {
            generation,
            context,
        });
    }

    pub fn submit_selection(&mut self) {
        if let Ok(context) = self.selection.submit() {
            self.start_quiz(context);
        }
    }

    /// Route a worker reply to the flow that asked for it.
    pub fn process_api_response(&mut self, response: ApiResponse) {
        let applied = match response {
            ApiResponse::Tags { generation, result } => {
                self.selection.finish_tag_load(generation, result)
            }
            ApiResponse::Questions { generation, result } => match self.quiz.as_mut() {
                Some(quiz) => quiz.resolve(generation, result),
                None => false,
            },
        };
        if !applied {
            debug!("Response did not match an active flow");
        }
    }

    pub fn quit(&mut self) {
        info!("Quitting");
        self.should_quit = true;
    }
}
