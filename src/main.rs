use clap::Parser;
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use recall_quiz::{api::ApiClient, config::ClientConfig, logger, tui, AppError, Cli, Command};
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match logger::init(&cli.log_file) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Exiting with error");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = ClientConfig::try_from(&cli.server)?;
    info!(base_url = %config.base_url, "Starting recall-quiz");
    let client = ApiClient::new(config)?;

    match cli.command {
        Some(Command::Capture { source, content }) => capture(&client, content, &source).await,
        Some(Command::Quiz) | None => run_tui(client).await,
    }
}

async fn capture(client: &ApiClient, content: Option<String>, source: &str) -> Result<(), AppError> {
    let content = match content {
        Some(content) => content,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };
    if content.trim().is_empty() {
        return Err(AppError::Config("nothing to capture".to_string()));
    }

    let receipt = client.capture(content.trim(), source).await?;
    if receipt.message.is_empty() {
        println!("Captured.");
    } else {
        println!("{}", receipt.message);
    }
    Ok(())
}

async fn run_tui(client: ApiClient) -> Result<(), AppError> {
    enable_raw_mode()?;

    let result = match enter_terminal() {
        Ok(mut terminal) => {
            let result = tui::run(&mut terminal, EventStream::new(), Arc::new(client)).await;
            let restored = execute!(terminal.backend_mut(), LeaveAlternateScreen)
                .and_then(|()| terminal.show_cursor());
            result.and(restored.map_err(AppError::from))
        }
        Err(e) => {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            Err(e.into())
        }
    };

    // Raw mode is turned off on every path, even when setup failed.
    let raw = disable_raw_mode();
    result?;
    raw?;
    Ok(())
}

fn enter_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}
