use colored::*;
use persona_chat::api::response::{extract_finish_reason, extract_text};
use persona_chat::api::GeminiClient;
use persona_chat::config::Config;
use persona_chat::dispatcher::compose_prompt;
use persona_chat::models::Message;
use persona_chat::prompts;
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Get command line args
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage: {} <message> [--character <id>] [--topic <id>]",
            program_name(&args)
        );
        std::process::exit(1);
    }

    let message = &args[1];
    let flag = |name: &str| {
        args.iter()
            .position(|a| a == name)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    };
    let (profile, source) = prompts::resolve(flag("--character"), flag("--topic"));

    let config = Config::default();
    let api_key = config.require_api_key()?;
    let client = GeminiClient::new(
        api_key,
        &config.api_endpoint,
        &config.model,
        config.generation.clone(),
        Duration::from_secs(config.api_timeout_secs),
    )?;

    let prompt = compose_prompt(profile, &[Message::user(message.as_str())]);

    println!("{}", format!("Using model: {}", client.model()).green());
    println!("{}", format!("Profile: {} ({:?})", profile.id, source).cyan());
    println!("{}", "-".repeat(80).dimmed());
    println!("{}", "Composed prompt:".bold());
    println!("{}", prompt);
    println!("{}", "-".repeat(80).dimmed());

    let (status, body) = client.generate_raw(&prompt).await?;

    println!("{}", format!("HTTP status: {}", status).yellow());
    println!("{}", "Raw response:".bold());
    println!("{}", serde_json::to_string_pretty(&body)?);
    println!("{}", "-".repeat(80).dimmed());

    match extract_text(&body) {
        Ok(Some(text)) => println!("{}\n{}", "Extracted text:".bold(), text),
        Ok(None) => println!(
            "{}",
            format!(
                "No text in response (finish reason: {})",
                extract_finish_reason(&body).unwrap_or_else(|| "unknown".to_string())
            )
            .red()
        ),
        Err(e) => println!("{}", format!("Backend error: {}", e).red()),
    }

    Ok(())
}

fn program_name(args: &[String]) -> &str {
    args.first().map_or("check-raw", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::program_name;

    #[test]
    fn test_program_name_without_argv() {
        assert_eq!(program_name(&[]), "check-raw");
        assert_eq!(program_name(&["/usr/bin/check-raw".to_string()]), "/usr/bin/check-raw");
    }
}
