mod message;
mod session;

pub use message::{Message, Role};
pub use session::{ChatSession, Selector};
