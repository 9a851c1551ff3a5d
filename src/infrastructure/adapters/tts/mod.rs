//! TTS Adapter - 云端 TTS 客户端与本地备用引擎

mod espeak_engine;
mod google_tts_client;

pub use espeak_engine::{parse_voices, EspeakEngine, EspeakEngineConfig};
pub use google_tts_client::*;
