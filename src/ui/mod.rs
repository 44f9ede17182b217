mod output;

pub use output::{
    display_error_banner, display_header, display_message, display_personas, display_sessions,
    display_thinking, display_topics, display_transcript, render_markdown,
};
