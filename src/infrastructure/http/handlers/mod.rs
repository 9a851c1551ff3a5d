//! HTTP Handlers

mod audio;
mod health;
mod narrate;
mod story;

pub use audio::*;
pub use health::*;
pub use narrate::*;
pub use story::*;
