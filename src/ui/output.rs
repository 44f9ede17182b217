use crate::catalog::{Persona, Topic};
use crate::models::{ChatSession, Message, Role};
use colored::*;
use regex::Regex;
use std::sync::OnceLock;

const RULE: &str = "──────────────────────────────────────────────────────────";

/// Render `**bold**` markdown spans with terminal bold.
pub fn render_markdown(content: &str) -> String {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    let re = BOLD.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold pattern"));
    re.replace_all(content, |cap: &regex::Captures| cap[1].bold().to_string())
        .into_owned()
}

/// Display the header shown when a view is mounted
pub fn display_header(title: &str, speaker: &str, session_id: &str) {
    println!("{}", format!("┌─[{}]", title).cyan());
    println!(
        "{}",
        format!("│ speaking with {} · session {}", speaker, session_id).dimmed()
    );
    println!("{}", format!("└{}", RULE).dimmed());
}

/// Display one transcript entry
pub fn display_message(message: &Message, speaker: &str) {
    match message.role() {
        Role::User => {
            println!("{} {}", "You:".yellow().bold(), message.content());
        }
        Role::Assistant => {
            println!("{}", speaker.cyan().bold());
            println!("{}", render_markdown(message.content()));
        }
    }
    println!();
}

pub fn display_transcript(messages: &[Message], speaker: &str) {
    for message in messages {
        display_message(message, speaker);
    }
}

/// Display the dismissible error banner
pub fn display_error_banner(error: &str) {
    eprintln!("{} {}", "✗".red().bold(), error.red());
    eprintln!("{}", "  (type /dismiss to hide)".dimmed());
}

pub fn display_thinking() {
    println!("{}", "Thinking...".dimmed());
}

pub fn display_sessions(sessions: &[ChatSession]) {
    if sessions.is_empty() {
        println!("{}", "No saved conversations.".dimmed());
        return;
    }
    for session in sessions {
        let selector = session
            .selector()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("{}  {}", session.id.cyan(), session.title.bold());
        println!(
            "{}",
            format!(
                "    {} · {} · {} messages",
                session.created_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
                selector,
                session.messages.len()
            )
            .dimmed()
        );
    }
}

pub fn display_personas(personas: &[Persona]) {
    for persona in personas {
        println!(
            "{:<10} {:<16} {} {}",
            persona.id.cyan(),
            persona.name.bold(),
            persona.description,
            format!("({} followers)", persona.followers).dimmed()
        );
    }
}

pub fn display_topics(topics: &[Topic]) {
    for topic in topics {
        println!(
            "{:<12} {:<22} {}",
            topic.id.cyan(),
            topic.title.bold(),
            topic.description
        );
    }
}
