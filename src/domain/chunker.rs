//! 文本分块器
//!
//! 把任意长度的朗读文本切成不超过语音引擎字符上限的块，
//! 永远不在句子中间断开。
//!
//! 分块策略：
//! 1. 按句末标点（`.` `!` `?` 后跟空白）切句
//! 2. 贪心装箱：`当前块 + 空格 + 下一句` 不超限就并入当前块
//! 3. 超限则封闭当前块，下一句另起新块

/// 默认块上限：OpenAI 语音接口硬上限 4096，留出安全余量
pub const DEFAULT_MAX_CHARS: usize = 4000;

/// 检查是否为句末标点
#[inline]
fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// 按句末标点切句（标点归属前句，句间空白丢弃）
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);

        // 句末标点后跟空白才算边界，"3.5" 这类不会被切开
        if is_terminal(ch) && chars.peek().map_or(true, |next| next.is_whitespace()) {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

/// 把文本切成不超过 `max_chars` 的块
///
/// 单句超限时该句独立成块原样输出（已知局限：不再做词级
/// 二次切分，由下游语音引擎按自身上限拒绝或截断）。
/// 用单个空格重新连接所有块，可还原除空白差异外的原文。
pub fn chunk(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        if current.is_empty() {
            current = sentence;
            continue;
        }

        // +1 是块内句子之间的空格
        if current.chars().count() + 1 + sentence.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(&sentence);
        } else {
            chunks.push(std::mem::take(&mut current));
            current = sentence;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// 使用默认上限分块（便捷方法）
pub fn chunk_default(text: &str) -> Vec<String> {
    chunk(text, DEFAULT_MAX_CHARS)
}
