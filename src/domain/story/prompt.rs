//! Story Context - 提示词构建
//!
//! 根据角色、主题、目标字数和语言生成发送给文本生成服务的提示词

use super::value_objects::Language;

/// 固定的系统指令
pub const SYSTEM_PROMPT: &str = "You are a creative storyteller who writes engaging, imaginative stories \
suitable for children and families. \
Always write in the requested language. \
Make sure the story has a clear beginning, middle, and end. \
For Hindi stories, write longer, more detailed stories with rich descriptions.";

/// 计算目标字数
///
/// `duration_minutes * words_per_minute`，印地语再乘以 `hindi_multiplier` 后取整
pub fn target_word_count(
    duration_minutes: u32,
    words_per_minute: u32,
    language: Language,
    hindi_multiplier: f64,
) -> u32 {
    let base = duration_minutes.saturating_mul(words_per_minute);
    match language {
        Language::English => base,
        Language::Hindi => (f64::from(base) * hindi_multiplier) as u32,
    }
}

/// 构建用户提示词
pub fn build_story_prompt(
    character: Option<&str>,
    theme: Option<&str>,
    word_count: u32,
    language: Language,
) -> String {
    let character = character.map(str::trim).filter(|c| !c.is_empty());
    let theme = theme.map(str::trim).filter(|t| !t.is_empty());

    match language {
        Language::Hindi => hindi_prompt(character, theme, word_count),
        Language::English => english_prompt(character, theme, word_count),
    }
}

fn english_prompt(character: Option<&str>, theme: Option<&str>, word_count: u32) -> String {
    let mut prompt = String::from("You are a creative storyteller. ");

    if let Some(character) = character {
        prompt.push_str(&format!(
            "If the character \"{}\" already appears in a movie, cartoon, web series, or book, \
             use the character naturally in the story, but do not mention where it comes from. \
             If the character is not known, treat it as an original character. ",
            character
        ));
    }

    prompt.push_str(&format!(
        "Write a creative, engaging story of about {} words. ",
        word_count
    ));

    if let Some(theme) = theme {
        prompt.push_str(&format!("The theme of the story should be \"{}\". ", theme));
    }

    prompt.push_str(
        "The story must have a clear beginning, middle, and end, with challenges, emotions, \
         and a meaningful resolution. Make it vivid, imaginative, and suitable for children and families. \
         Write everything in English.",
    );

    prompt
}

fn hindi_prompt(character: Option<&str>, theme: Option<&str>, word_count: u32) -> String {
    let mut prompt = String::from("आप एक रचनात्मक कहानीकार हैं। ");

    if let Some(character) = character {
        prompt.push_str(&format!(
            "यदि पात्र \"{}\" किसी फ़िल्म, कार्टून, वेब सीरीज़ या किताब से जुड़ा हुआ है तो उस पात्र का उपयोग \
             सीधे कहानी में कीजिए, लेकिन यह मत बताइए कि वह कहाँ से आता है। यदि पात्र ज्ञात नहीं है, \
             तो उसे एक मौलिक पात्र मानकर कहानी में प्रयोग कीजिए। ",
            character
        ));
    }

    prompt.push_str(&format!(
        "लगभग {} शब्दों की एक विस्तृत, रचनात्मक और रोचक कहानी लिखिए। \
         कहानी में जीवंत वर्णन, संवाद, और विस्तृत विवरण शामिल करें। ",
        word_count
    ));

    if let Some(theme) = theme {
        prompt.push_str(&format!("कहानी का मुख्य विषय \"{}\" होना चाहिए। ", theme));
    }

    prompt.push_str(&format!(
        "कहानी में स्पष्ट शुरुआत, मध्य और अंत हो। \
         पात्रों के विचारों, भावनाओं और कार्यों का विस्तृत वर्णन करें। \
         इसे बच्चों और परिवारों के लिए उपयुक्त बनाएँ। \
         पूरी कहानी हिंदी में लिखें और कम से कम {} शब्दों की होनी चाहिए।",
        word_count
    ));

    prompt
}
