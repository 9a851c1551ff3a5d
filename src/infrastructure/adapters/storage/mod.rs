//! Storage Adapter - 文件系统音频存储

mod file_storage;

pub use file_storage::FileAudioStorage;
