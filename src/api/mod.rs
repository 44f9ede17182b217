pub mod client;
pub mod models;
pub mod response;

pub use client::GeminiClient;
pub use models::RequestBody;
