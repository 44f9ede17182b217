use crate::models::Message;
use crate::prompts::{PromptProfile, SYSTEM_PROMPT};

/// Number of trailing messages forwarded to the model.
pub const HISTORY_WINDOW: usize = 5;

/// The last `HISTORY_WINDOW` messages; older turns are dropped from context.
pub fn window(messages: &[Message]) -> &[Message] {
    let start = messages.len().saturating_sub(HISTORY_WINDOW);
    &messages[start..]
}

/// Render turns as `Human: ...` / `Assistant: ...` lines.
pub fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role().prompt_label(), m.content()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn compose_prompt(profile: &PromptProfile, messages: &[Message]) -> String {
    format!(
        "{}\n\n{}\n\nConversation:\n{}\n\nAssistant:",
        SYSTEM_PROMPT,
        profile.text,
        render_transcript(window(messages))
    )
}
