//! Command Handlers

mod narrate_handlers;
mod story_handlers;

pub use narrate_handlers::NarrateTextHandler;
pub use story_handlers::{GenerateStoryHandler, GenerateStoryResponse};
