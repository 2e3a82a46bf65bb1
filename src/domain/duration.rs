//! 时长估算
//!
//! 纯函数，按词数估算播放时长，不解码实际音频（结果仅为近似值，
//! 从不与真实音频时长对账）。

use super::script::Story;

/// 朗读语速假设：150 词/分钟
pub const WORDS_PER_MINUTE: f64 = 150.0;

/// 每个分隔音效约 1.5 秒
pub const SEPARATOR_SECONDS: f64 = 1.5;

#[inline]
fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 估算整集播放时长（秒）
///
/// `speech = ceil(总词数 / 150 * 60)`，再加上分隔音效时长：
/// 每条故事一个分隔，结束语非空时再加一个。
pub fn estimate(intro: &str, stories: &[Story], outro: &str) -> f64 {
    let words = word_count(intro)
        + stories.iter().map(|s| word_count(&s.content)).sum::<usize>()
        + word_count(outro);

    let speech_seconds = (words as f64 / WORDS_PER_MINUTE * 60.0).ceil();

    let separator_count = stories.len() + usize::from(!outro.is_empty());
    let sep_seconds = separator_count as f64 * SEPARATOR_SECONDS;

    speech_seconds + sep_seconds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(content: &str) -> Story {
        Story {
            title: "t".to_string(),
            content: content.to_string(),
            sources: Vec::new(),
        }
    }

    #[test]
    fn test_empty_script_is_zero() {
        assert_eq!(estimate("", &[], ""), 0.0);
    }

    #[test]
    fn test_formula() {
        // 150 词 = 60 秒，2 故事 + 结束语 = 3 个分隔 = 4.5 秒
        let fifty = "word ".repeat(50);
        let stories = vec![story(&fifty), story(&fifty)];
        let duration = estimate(&fifty, &stories, "bye");
        // 151 词 → ceil(60.4) = 61 秒语音
        assert_eq!(duration, 61.0 + 3.0 * SEPARATOR_SECONDS);
    }

    #[test]
    fn test_ceiling_applied_to_speech() {
        // 1 词 → ceil(0.4) = 1 秒
        assert_eq!(estimate("hello", &[], ""), 1.0);
    }

    #[test]
    fn test_outro_adds_one_separator() {
        let base = estimate("intro words here", &[], "");
        let with_outro = estimate("intro words here", &[], "bye");
        // 结束语 1 词不会增加已取整的语音秒数之外，至少多出一个分隔
        assert!(with_outro >= base + SEPARATOR_SECONDS);
    }

    #[test]
    fn test_adding_story_strictly_increases() {
        let intro = "welcome to the show everyone";
        let mut stories = Vec::new();
        let mut prev = estimate(intro, &stories, "bye");
        for _ in 0..5 {
            stories.push(story("something newsworthy happened today"));
            let next = estimate(intro, &stories, "bye");
            assert!(next > prev, "duration must strictly increase");
            prev = next;
        }
    }
}
