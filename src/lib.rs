pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod quiz;
pub mod selection;
pub mod session;
pub mod tui;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use api::{spawn_api_worker, ApiClient, QuestionSource, TagSource};
pub use app::App;
pub use config::{Cli, ClientConfig, Command};
pub use error::{ApiError, AppError, SelectionError, TransitionError};
pub use models::{AppState, QueryContext, QueryMode, Question, Tag};
pub use quiz::{EmptyReason, QuizFlow, QuizPhase};
pub use selection::SelectionFlow;
pub use session::handle_key;
pub use ui::draw;
