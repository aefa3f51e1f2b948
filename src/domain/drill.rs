//! 练习文本生成器
//!
//! 提供按目标长度随机组装文本的功能：
//! - 单词流：素材重复 n 次、短语边界去重
//! - 字符组流：定宽字符组（ICRT 练习）

use rand::seq::SliceRandom;
use rand::Rng;

use super::errors::DrillError;
use super::segment::BOUNDARY;

/// 默认字符组大小
pub const DEFAULT_GROUP_SIZE: usize = 5;

/// Fisher–Yates 洗牌（原地）
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

#[inline]
fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// 折叠相邻的重复边界符：`<BT> <BT>` → `<BT>`
fn collapse_boundaries(text: &str) -> String {
    let doubled = format!("{BOUNDARY} {BOUNDARY}");
    let mut collapsed = text.to_string();
    while collapsed.contains(&doubled) {
        collapsed = collapsed.replace(&doubled, BOUNDARY);
    }
    collapsed
}

/// 追加一个重复块，同时折叠块内以及块与已有内容交界处的边界符
///
/// 返回实际追加的字符数
fn append_block(stream: &mut String, block: &str) -> usize {
    let collapsed = collapse_boundaries(block);
    let mut appended = collapsed.as_str();

    if stream.ends_with(BOUNDARY) {
        if let Some(rest) = appended
            .strip_prefix(' ')
            .and_then(|s| s.strip_prefix(BOUNDARY))
            .filter(|rest| rest.starts_with(' '))
        {
            appended = rest;
        }
    }

    stream.push_str(appended);
    char_len(appended)
}

/// 生成按目标长度截止的单词流
///
/// 1. 复制素材池直到拼接长度不小于 `target_length`，然后洗牌
/// 2. 每个元素连续输出 `repetition` 次，每次前置一个空格
/// 3. 折叠重复的 `<BT>`
/// 4. 输出长度达到 `target_length` 即停止（可能超出一个重复块）
pub fn build_word_stream<R: Rng + ?Sized>(
    pool: &[String],
    repetition: u32,
    target_length: usize,
    rng: &mut R,
) -> Result<String, DrillError> {
    if repetition == 0 {
        return Err(DrillError::ZeroRepetition);
    }
    if target_length == 0 {
        return Ok(String::new());
    }

    let pool_len: usize = pool.iter().map(|token| char_len(token)).sum();
    if pool_len == 0 {
        return Err(DrillError::EmptyPool {
            target: target_length,
        });
    }

    let mut tokens: Vec<&str> = Vec::new();
    let mut replicated_len = 0;
    while replicated_len < target_length {
        tokens.extend(pool.iter().map(String::as_str));
        replicated_len += pool_len;
    }
    shuffle(&mut tokens, rng);

    let mut stream = String::with_capacity(target_length + target_length / 2);
    let mut stream_len = 0;
    let mut block = String::new();

    // 每个块至少追加一个空格，cycle 保证一定能到达目标长度
    for token in tokens.iter().cycle() {
        if stream_len >= target_length {
            break;
        }

        block.clear();
        for _ in 0..repetition {
            block.push(' ');
            block.push_str(token);
        }
        stream_len += append_block(&mut stream, &block);
    }

    Ok(stream)
}

/// 生成定宽字符组流（ICRT）
///
/// `target_length` 按字符数计（不是组数）。复制字符池直到数量不小于目标、洗牌，
/// 再按 `group_size` 切组；末尾不足一组的字符直接丢弃，保证每组等宽。
/// 每组前置一个空格。
pub fn build_group_stream<R: Rng + ?Sized>(
    pool: &[String],
    group_size: usize,
    target_length: usize,
    rng: &mut R,
) -> Result<String, DrillError> {
    if group_size == 0 {
        return Err(DrillError::ZeroGroupSize);
    }
    if target_length == 0 {
        return Ok(String::new());
    }
    if pool.is_empty() {
        return Err(DrillError::EmptyPool {
            target: target_length,
        });
    }

    let copies = target_length.div_ceil(pool.len());
    let mut chars: Vec<&str> = Vec::with_capacity(copies * pool.len());
    for _ in 0..copies {
        chars.extend(pool.iter().map(String::as_str));
    }
    shuffle(&mut chars, rng);

    let mut stream = String::with_capacity(target_length + target_length / group_size + 1);
    for group in chars.chunks_exact(group_size) {
        stream.push(' ');
        for ch in group {
            stream.push_str(ch);
        }
    }

    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut rng());

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_small_inputs_unchanged() {
        let mut empty: Vec<u32> = vec![];
        shuffle(&mut empty, &mut rng());
        assert!(empty.is_empty());

        let mut single = vec![42];
        shuffle(&mut single, &mut rng());
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn test_shuffle_seeded_is_reproducible() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        shuffle(&mut a, &mut StdRng::seed_from_u64(99));
        shuffle(&mut b, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_collapse_boundaries() {
        assert_eq!(collapse_boundaries("<BT> a <BT> <BT> a <BT>"), "<BT> a <BT> a <BT>");
        assert_eq!(collapse_boundaries("<BT> <BT> <BT>"), "<BT>");
        assert_eq!(collapse_boundaries("no markers"), "no markers");
    }

    #[test]
    fn test_word_stream_zero_target_is_empty() {
        let pool = strings(&["the", "quick"]);
        assert_eq!(build_word_stream(&pool, 2, 0, &mut rng()).unwrap(), "");
    }

    #[test]
    fn test_word_stream_rejects_empty_pool() {
        let err = build_word_stream(&[], 1, 10, &mut rng()).unwrap_err();
        assert_eq!(err, DrillError::EmptyPool { target: 10 });

        let blanks = strings(&["", ""]);
        assert!(build_word_stream(&blanks, 1, 10, &mut rng()).is_err());
    }

    #[test]
    fn test_word_stream_rejects_zero_repetition() {
        let pool = strings(&["a"]);
        assert_eq!(
            build_word_stream(&pool, 0, 10, &mut rng()).unwrap_err(),
            DrillError::ZeroRepetition
        );
    }

    #[test]
    fn test_word_stream_reaches_target_length() {
        let pool = strings(&["the", "quick", "brown", "fox"]);
        for target in [1, 5, 20, 137, 1000] {
            let stream = build_word_stream(&pool, 3, target, &mut rng()).unwrap();
            assert!(stream.chars().count() >= target, "target {target}");
            // 最多超出一个重复块
            assert!(stream.chars().count() < target + 3 * (" quick".len()));
        }
    }

    #[test]
    fn test_word_stream_runs_are_multiples_of_repetition() {
        let pool = strings(&["the", "quick", "brown", "fox", "jumps"]);
        let stream = build_word_stream(&pool, 2, 300, &mut rng()).unwrap();
        assert!(stream.starts_with(' '));

        let words: Vec<&str> = stream.split_whitespace().collect();
        let mut i = 0;
        while i < words.len() {
            let mut run = 1;
            while i + run < words.len() && words[i + run] == words[i] {
                run += 1;
            }
            assert_eq!(run % 2, 0, "word {} has run {}", words[i], run);
            i += run;
        }
    }

    #[test]
    fn test_word_stream_never_doubles_boundary() {
        let pool = strings(&["<BT> good morning <BT>", "<BT> tnx fer call <BT>", "<BT> 73 <BT>"]);
        for repetition in 1..=4 {
            let stream = build_word_stream(&pool, repetition, 500, &mut rng()).unwrap();
            assert!(!stream.contains("<BT> <BT>"), "repetition {repetition}: {stream}");
            assert!(stream.chars().count() >= 500);
        }
    }

    #[test]
    fn test_word_stream_boundary_collapsed_within_block() {
        let pool = strings(&["<BT> 73 <BT>"]);
        let stream = build_word_stream(&pool, 2, 1, &mut rng()).unwrap();
        assert_eq!(stream, " <BT> 73 <BT> 73 <BT>");
    }

    #[test]
    fn test_word_stream_seeded_is_reproducible() {
        let pool = strings(&["cq", "de", "w1aw", "<BT> name hr <BT>"]);
        let a = build_word_stream(&pool, 2, 200, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = build_word_stream(&pool, 2, 200, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_group_stream_zero_target_is_empty() {
        let pool = strings(&["a", "b"]);
        assert_eq!(build_group_stream(&pool, 5, 0, &mut rng()).unwrap(), "");
    }

    #[test]
    fn test_group_stream_rejects_invalid_input() {
        let pool = strings(&["a"]);
        assert_eq!(
            build_group_stream(&pool, 0, 10, &mut rng()).unwrap_err(),
            DrillError::ZeroGroupSize
        );
        assert_eq!(
            build_group_stream(&[], 5, 10, &mut rng()).unwrap_err(),
            DrillError::EmptyPool { target: 10 }
        );
    }

    #[test]
    fn test_group_stream_fixed_width_groups() {
        let pool = strings(&["a", "b", "c"]);
        for (group_size, target) in [(5, 100), (3, 10), (4, 7), (1, 9)] {
            let stream = build_group_stream(&pool, group_size, target, &mut rng()).unwrap();
            assert!(stream.is_empty() || stream.starts_with(' '));

            let groups: Vec<&str> = stream.split(' ').skip(1).collect();
            assert!(groups.iter().all(|g| g.chars().count() == group_size));

            let total: usize = groups.iter().map(|g| g.chars().count()).sum();
            assert_eq!(total % group_size, 0);
            assert!(total + group_size > target, "group {group_size} target {target}");
        }
    }

    #[test]
    fn test_group_stream_discards_partial_group() {
        // 2 个字符复制到 4 个，不足一组 5 个，全部丢弃
        let pool = strings(&["a", "b"]);
        assert_eq!(build_group_stream(&pool, 5, 3, &mut rng()).unwrap(), "");
    }

    #[test]
    fn test_group_stream_uses_only_pool_characters() {
        let pool = strings(&["k", "m", "r"]);
        let stream = build_group_stream(&pool, 5, 50, &mut rng()).unwrap();
        assert!(stream.chars().all(|c| c == ' ' || "kmr".contains(c)));
    }
}
