//! Query Handlers

mod audio_handlers;

pub use audio_handlers::GetAudioHandler;
