//! Story Context - 故事限界上下文
//!
//! 职责:
//! - 请求校验（角色、主题、时长）
//! - 目标字数计算
//! - 提示词构建

mod errors;
mod prompt;
mod validation;
mod value_objects;

pub use errors::StoryValidationError;
pub use prompt::{build_story_prompt, target_word_count, SYSTEM_PROMPT};
pub use validation::{validate_duration, validate_input, MIN_SUBJECT_LEN};
pub use value_objects::Language;
