//! Story Context - 输入校验
//!
//! 纯函数，无副作用

use super::errors::StoryValidationError;

/// 角色/主题修剪空白后的最小长度（按字符计）
pub const MIN_SUBJECT_LEN: usize = 2;

/// 校验故事请求的角色与主题
///
/// - 角色与主题至少提供一个（空字符串视为未提供）
/// - 提供的值去除首尾空白后不能少于 [`MIN_SUBJECT_LEN`] 个字符
pub fn validate_input(
    character: Option<&str>,
    theme: Option<&str>,
) -> Result<(), StoryValidationError> {
    let character = character.filter(|c| !c.is_empty());
    let theme = theme.filter(|t| !t.is_empty());

    if character.is_none() && theme.is_none() {
        return Err(StoryValidationError::MissingSubject);
    }

    if character.is_some_and(|c| c.trim().chars().count() < MIN_SUBJECT_LEN) {
        return Err(StoryValidationError::CharacterTooShort {
            min: MIN_SUBJECT_LEN,
        });
    }

    if theme.is_some_and(|t| t.trim().chars().count() < MIN_SUBJECT_LEN) {
        return Err(StoryValidationError::ThemeTooShort {
            min: MIN_SUBJECT_LEN,
        });
    }

    Ok(())
}

/// 校验时长（分钟）是否在 `[min, max]` 内
pub fn validate_duration(minutes: i64, min: i64, max: i64) -> Result<(), StoryValidationError> {
    if (min..=max).contains(&minutes) {
        Ok(())
    } else {
        Err(StoryValidationError::DurationOutOfRange { min, max })
    }
}
