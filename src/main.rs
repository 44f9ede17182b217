use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

use persona_chat::catalog::{self, PERSONAS, TOPICS};
use persona_chat::cli::{Args, Command, HistoryAction};
use persona_chat::config::Config;
use persona_chat::models::Selector;
use persona_chat::server;
use persona_chat::session::{
    ChatView, FilesystemSessionStore, HttpTransport, SessionRepository, TurnOutcome,
};
use persona_chat::ui;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("{} {:#}", "Error:".red(), e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("persona_chat={default_level},sage={default_level}")));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(args: Args) -> Result<()> {
    let config = Config::from_env_and_args(&args)?;

    match args.command {
        Command::Serve { .. } => {
            config.require_api_key()?;
            println!("{}", format!("Dispatcher listening on {}", config.bind).green());
            server::run(&config).await
        }
        Command::Chat {
            character,
            topic,
            session,
            ..
        } => {
            let selector = match (topic, character) {
                (Some(topic), _) => Selector::Topic(topic),
                (None, Some(character)) => Selector::Character(character),
                (None, None) => bail!("Either --character or --topic is required"),
            };
            chat(&config, selector, session.as_deref()).await
        }
        Command::History { action } => history(&config, action),
        Command::Personas => {
            ui::display_personas(PERSONAS);
            Ok(())
        }
        Command::Topics => {
            ui::display_topics(TOPICS);
            Ok(())
        }
    }
}

fn open_store(config: &Config) -> Arc<dyn SessionRepository> {
    Arc::new(FilesystemSessionStore::new(&config.storage_path))
}

async fn chat(config: &Config, selector: Selector, session_id: Option<&str>) -> Result<()> {
    let transport = HttpTransport::new(
        &config.server_url,
        Duration::from_secs(config.client_timeout_secs),
    )?;

    let mut view = ChatView::new(open_store(config), selector);
    view.mount(session_id)
        .with_context(|| format!("Failed to load sessions from {}", config.storage_path.display()))?;

    let speaker = catalog::speaker_name(view.selector());
    ui::display_header(view.title(), speaker, view.session_id().unwrap_or("-"));
    ui::display_transcript(view.messages(), speaker);

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("› ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        match line.trim() {
            "/quit" | "/exit" => break,
            "/dismiss" => {
                view.dismiss_error();
                continue;
            }
            "" => continue,
            _ => {}
        }
        let _ = editor.add_history_entry(line.as_str());

        ui::display_thinking();
        match view.submit(&line, &transport).await {
            TurnOutcome::Replied => {
                if let Some(reply) = view.messages().last() {
                    ui::display_message(reply, speaker);
                }
            }
            TurnOutcome::Failed => {
                if let Some(error) = view.error() {
                    ui::display_error_banner(error);
                }
            }
            TurnOutcome::Ignored | TurnOutcome::Discarded => {}
        }
    }

    if let Some(id) = view.session_id() {
        println!(
            "{}",
            format!("Resume with: sage chat --session {} {}", id, selector_flag(view.selector()))
                .dimmed()
        );
    }
    Ok(())
}

fn selector_flag(selector: &Selector) -> String {
    match selector {
        Selector::Character(id) => format!("--character {}", id),
        Selector::Topic(id) => format!("--topic {}", id),
    }
}

fn history(config: &Config, action: HistoryAction) -> Result<()> {
    let store = open_store(config);

    match action {
        HistoryAction::List => {
            ui::display_sessions(&store.list()?);
        }
        HistoryAction::Show { id } => {
            let Some(session) = store.get(&id)? else {
                bail!("No session with id {}", id);
            };
            let speaker = session
                .selector()
                .map(|s| catalog::speaker_name(&s))
                .unwrap_or("Assistant");
            ui::display_header(&session.title, speaker, &session.id);
            ui::display_transcript(&session.messages, speaker);
        }
        HistoryAction::Delete { id } => {
            if store.delete(&id)? {
                println!("{}", format!("Deleted session {}.", id).green());
            } else {
                bail!("No session with id {}", id);
            }
        }
        HistoryAction::Clear => {
            store.clear()?;
            println!("{}", "All conversation history cleared.".green());
        }
    }

    Ok(())
}
