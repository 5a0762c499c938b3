use crate::api::interceptor::{Interceptor, TracingInterceptor};
use crate::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";
pub const DEFAULT_QUESTION_COUNT: u32 = 10;
pub const DEFAULT_LOG_FILE: &str = "recall-quiz.log";

#[derive(Debug, Parser)]
#[command(name = "recall-quiz", version, about = "Quiz yourself on what you captured")]
pub struct Cli {
    #[command(flatten)]
    pub server: ServerArgs,

    /// File that receives log output (the terminal is used by the UI)
    #[arg(long, env = "RECALL_LOG_FILE", default_value = DEFAULT_LOG_FILE, global = true)]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args)]
pub struct ServerArgs {
    /// Base URL of the recall server API
    #[arg(long, env = "RECALL_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Number of questions to request per quiz
    #[arg(long, env = "RECALL_QUESTIONS", default_value_t = DEFAULT_QUESTION_COUNT, global = true)]
    pub questions: u32,

    /// Ask the server for at most this many tags
    #[arg(long, env = "RECALL_TAG_COUNT", global = true)]
    pub tag_count: Option<u32>,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, env = "RECALL_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the quiz interface (default)
    Quiz,
    /// Send a snippet to the server for later quizzing
    Capture {
        /// Where the snippet came from, e.g. a page URL
        #[arg(long, default_value = "copy_paste")]
        source: String,
        /// Snippet text; read from stdin when omitted
        content: Option<String>,
    },
}

/// Everything the HTTP client needs. Built once and handed to each flow's
/// client instead of living in process-wide defaults.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub question_count: u32,
    pub tag_count: Option<u32>,
    pub timeout: Option<Duration>,
    pub interceptors: Vec<Arc<dyn Interceptor>>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("question_count", &self.question_count)
            .field("tag_count", &self.tag_count)
            .field("timeout", &self.timeout)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            question_count: DEFAULT_QUESTION_COUNT,
            tag_count: None,
            timeout: None,
            interceptors: vec![Arc::new(TracingInterceptor)],
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }
}

impl TryFrom<&ServerArgs> for ClientConfig {
    type Error = AppError;

    fn try_from(args: &ServerArgs) -> Result<Self, Self::Error> {
        if args.questions == 0 {
            return Err(AppError::Config(
                "--questions must be at least 1".to_string(),
            ));
        }
        if args.base_url.trim().is_empty() {
            return Err(AppError::Config("--base-url must not be empty".to_string()));
        }

        Ok(Self {
            base_url: args.base_url.trim().to_string(),
            question_count: args.questions,
            tag_count: args.tag_count,
            timeout: args.timeout_secs.map(Duration::from_secs),
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_command_line() {
        let cli = Cli::try_parse_from(["recall-quiz"]).unwrap();
        let config = ClientConfig::try_from(&cli.server).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.question_count, 10);
        assert_eq!(config.tag_count, None);
        assert_eq!(config.timeout, None);
        assert_eq!(config.interceptors.len(), 1);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "recall-quiz",
            "--base-url",
            "http://example.test/api",
            "--questions",
            "5",
            "--tag-count",
            "20",
            "--timeout-secs",
            "30",
        ])
        .unwrap();
        let config = ClientConfig::try_from(&cli.server).unwrap();
        assert_eq!(config.base_url, "http://example.test/api");
        assert_eq!(config.question_count, 5);
        assert_eq!(config.tag_count, Some(20));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_questions_rejected() {
        let cli = Cli::try_parse_from(["recall-quiz", "--questions", "0"]).unwrap();
        assert!(matches!(
            ClientConfig::try_from(&cli.server),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_capture_subcommand() {
        let cli = Cli::try_parse_from([
            "recall-quiz",
            "capture",
            "--source",
            "https://doc.rust-lang.org",
            "Ownership moves values",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Capture { source, content }) => {
                assert_eq!(source, "https://doc.rust-lang.org");
                assert_eq!(content.as_deref(), Some("Ownership moves values"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
