//! 音频装配器
//!
//! 把各段落音频按播放顺序拼成一条字节流，相邻段落之间插入
//! 分隔音效。排序规则固定：
//!
//! ```text
//! intro, [sep, story1], [sep, story2], ..., [sep, outro]
//! ```
//!
//! 分隔音效只出现在两段音频之间——输出开头和结尾永远没有
//! 悬空的分隔；段落数不足两段时一个分隔都不插。

/// 按序拼接段落音频，相邻段落之间插入分隔音效
///
/// `pieces` 是已经合成好的段落音频（开场白、每条故事、结束语），
/// 顺序即播放顺序；空元素不应出现在其中（空文本段落在合成前
/// 就被跳过）。
pub fn assemble(pieces: &[Vec<u8>], separator: &[u8]) -> Vec<u8> {
    let separator_count = pieces.len().saturating_sub(1);
    let total = pieces.iter().map(Vec::len).sum::<usize>() + separator_count * separator.len();

    let mut output = Vec::with_capacity(total);
    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 {
            output.extend_from_slice(separator);
        }
        output.extend_from_slice(piece);
    }

    output
}
