//! 文本清理工具
//!
//! 故事生成与朗读共用

/// 将连续空白折叠为单个空格并去除首尾空白
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 清理生成的故事文本
///
/// 去除首尾空白，缺少结尾句号时补上，再折叠内部空白。
/// 结果非空时总以 `.` 结尾，且不含连续空白。
pub fn clean_story_text(text: &str) -> String {
    let mut story = text.trim().to_string();
    if !story.ends_with('.') {
        story.push('.');
    }
    clean_text(&story)
}

/// 按空白分词计数
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
