//! Narrate Command Handlers

use std::sync::Arc;

use crate::application::commands::NarrateText;
use crate::application::error::ApplicationError;
use crate::application::services::{GeneratedAudio, NarrationService};

/// NarrateText Handler
pub struct NarrateTextHandler {
    narration: Arc<NarrationService>,
}

impl NarrateTextHandler {
    pub fn new(narration: Arc<NarrationService>) -> Self {
        Self { narration }
    }

    pub async fn handle(&self, command: NarrateText) -> Result<GeneratedAudio, ApplicationError> {
        if command.text.trim().is_empty() {
            return Err(ApplicationError::validation("Text cannot be empty"));
        }

        self.narration.narrate(&command.text, command.language).await
    }
}
