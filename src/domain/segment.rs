//! Segment - 练习单元
//!
//! 一个 Segment 包含单词、呼号、短语和本单元新引入的字符

use serde::Deserialize;

/// 短语边界勤务符号（prosign BT）
pub const BOUNDARY: &str = "<BT>";

/// 练习单元
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Segment {
    /// 单元名称（全局唯一，直接用于输出文件名）
    pub name: String,

    #[serde(default)]
    pub words: Vec<String>,

    #[serde(default)]
    pub callsigns: Vec<String>,

    #[serde(default)]
    pub phrases: Vec<String>,

    /// 本单元新引入的字符
    #[serde(default)]
    pub characters: Vec<String>,
}

impl Segment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// 合并单词、呼号和短语为一个素材池
    ///
    /// 顺序固定为：单词、呼号、被 `<BT>` 包裹的短语。
    /// 洗牌之后顺序不再有意义，但这里保持确定性便于测试。
    pub fn token_pool(&self) -> Vec<String> {
        let mut pool = Vec::with_capacity(self.words.len() + self.callsigns.len() + self.phrases.len());
        pool.extend(self.words.iter().cloned());
        pool.extend(self.callsigns.iter().cloned());
        pool.extend(
            self.phrases
                .iter()
                .map(|phrase| format!("{BOUNDARY} {phrase} {BOUNDARY}")),
        );
        pool
    }
}

/// 累积字符集：`segments[0..=index]` 的字符并集
///
/// 保持配置顺序，重复字符只保留第一次出现。
/// `index` 越界时取全部单元。
pub fn cumulative_characters(segments: &[Segment], index: usize) -> Vec<String> {
    let end = index.saturating_add(1).min(segments.len());
    let mut union: Vec<String> = Vec::new();
    for ch in segments[..end].iter().flat_map(|s| s.characters.iter()) {
        if !union.contains(ch) {
            union.push(ch.clone());
        }
    }
    union
}
