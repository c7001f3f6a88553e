use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use handbook_chat::app::App;
use handbook_chat::tui::{self, EventHandler, Tui};
use handbook_chat::{handler, logging, ui};
use handbook_chat::{ask_once, AskClient, Config};

#[derive(Parser)]
#[command(name = "handbook-chat")]
#[command(about = "Chat with the handbook question-answering service")]
struct Cli {
    /// Base URL of the answering service
    #[arg(short, long, global = true, env = "HANDBOOK_CHAT_SERVER")]
    server: Option<String>,

    /// Where to write diagnostics in interactive mode
    #[arg(long, global = true, env = "HANDBOOK_CHAT_LOG")]
    log_file: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Ignore new questions while one is still waiting for an answer
    #[arg(long)]
    single_in_flight: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question and print the answer
    Ask {
        /// Your question
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    }
    .with_overrides(cli.server, cli.log_file, cli.single_in_flight);
    config.validate()?;

    match cli.command {
        Some(Commands::Ask { question }) => {
            logging::init_stderr()?;
            let client = AskClient::new(&config.server);
            let outcome = ask_once(&client, &question).await?;
            println!("{}", outcome.text);
            if !outcome.answered {
                std::process::exit(outcome.exit_code());
            }
            Ok(())
        }
        None => {
            logging::init_file(&config.log_path())?;
            run_interactive(&config).await
        }
    }
}

async fn run_interactive(config: &Config) -> Result<()> {
    tui::install_panic_hook();

    let mut terminal = match tui::init() {
        Ok(terminal) => terminal,
        Err(err) => {
            let _ = tui::restore();
            return Err(err);
        }
    };

    let mut events = EventHandler::new();
    let mut app = App::new(config, events.sender());

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    terminal.show_cursor()?;
    tracing::info!("chat closed");

    result
}

async fn run_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }
    }
    Ok(())
}
