//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_storage;
mod text_generation;
mod tts_engine;

pub use audio_storage::{AudioStorageError, AudioStoragePort, CleanupReport, StoredAudio};
pub use text_generation::{CompletionRequest, GenerationError, TextGenerationPort};
pub use tts_engine::{
    LocalSpeechEnginePort, LocalSynthesisRequest, SpeechSynthesisPort, SynthesisOutput,
    SynthesisRequest, TtsError,
};
