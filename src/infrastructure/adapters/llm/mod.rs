//! LLM Adapter - 文本生成客户端

mod openai_client;

pub use openai_client::{OpenAiClient, OpenAiClientConfig};
