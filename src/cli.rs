use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sage")]
#[command(about = "Converse with biblical personas and topical mentors", long_about = None)]
pub struct Args {
    #[arg(short = 'v', long = "verbose", global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(long = "config", global = true, help = "Path to a YAML or JSON config file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the prompt dispatcher HTTP server
    Serve {
        #[arg(long = "bind", help = "Address to listen on (e.g. 127.0.0.1:3000)")]
        bind: Option<String>,
    },

    /// Open an interactive chat with a persona or topic
    #[command(group(ArgGroup::new("selector").required(true).args(["character", "topic"])))]
    Chat {
        #[arg(short = 'c', long = "character", help = "Persona id (e.g. solomon)")]
        character: Option<String>,

        #[arg(short = 't', long = "topic", help = "Topic id (e.g. wisdom)")]
        topic: Option<String>,

        #[arg(short = 's', long = "session", help = "Resume the session with this id")]
        session: Option<String>,

        #[arg(long = "server", help = "Dispatcher base URL (e.g. http://127.0.0.1:3000)")]
        server: Option<String>,
    },

    /// Inspect and manage saved conversations
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// List available personas
    Personas,

    /// List available topics
    Topics,
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List saved sessions, most recent first
    List,
    /// Print the transcript of one session
    Show { id: String },
    /// Delete one session
    Delete { id: String },
    /// Delete every saved session
    Clear,
}
