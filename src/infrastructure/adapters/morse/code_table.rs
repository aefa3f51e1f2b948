//! 国际摩尔斯电码表

/// 单个字符的电码（`.` = dit，`-` = dah），不区分大小写
pub fn code_for(ch: char) -> Option<&'static str> {
    let code = match ch.to_ascii_uppercase() {
        'A' => ".-",
        'B' => "-...",
        'C' => "-.-.",
        'D' => "-..",
        'E' => ".",
        'F' => "..-.",
        'G' => "--.",
        'H' => "....",
        'I' => "..",
        'J' => ".---",
        'K' => "-.-",
        'L' => ".-..",
        'M' => "--",
        'N' => "-.",
        'O' => "---",
        'P' => ".--.",
        'Q' => "--.-",
        'R' => ".-.",
        'S' => "...",
        'T' => "-",
        'U' => "..-",
        'V' => "...-",
        'W' => ".--",
        'X' => "-..-",
        'Y' => "-.--",
        'Z' => "--..",
        '0' => "-----",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",
        '.' => ".-.-.-",
        ',' => "--..--",
        '?' => "..--..",
        '/' => "-..-.",
        '=' => "-...-",
        '+' => ".-.-.",
        '-' => "-....-",
        '\'' => ".----.",
        '"' => ".-..-.",
        '(' => "-.--.",
        ')' => "-.--.-",
        ':' => "---...",
        ';' => "-.-.-.",
        '@' => ".--.-.",
        '!' => "-.-.--",
        '&' => ".-...",
        _ => return None,
    };
    Some(code)
}

/// 将一个单词拆成电码序列
///
/// `<BT>` 这类勤务符号的字母之间没有字符间隔，合并成一个电码。
/// 无法编码的字符被跳过并返回在第二个结果中。
pub fn encode_word(word: &str) -> (Vec<String>, Vec<char>) {
    let mut codes = Vec::new();
    let mut skipped = Vec::new();
    let mut chars = word.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '<' {
            let rest: String = chars.clone().collect();
            if let Some(end) = rest.find('>') {
                let prosign = &rest[..end];
                let mut code = String::new();
                for letter in prosign.chars() {
                    match code_for(letter) {
                        Some(c) => code.push_str(c),
                        None => skipped.push(letter),
                    }
                }
                if !code.is_empty() {
                    codes.push(code);
                }
                // 跳过 prosign 内容和右尖括号
                for _ in 0..=prosign.chars().count() {
                    chars.next();
                }
                continue;
            }
        }

        match code_for(ch) {
            Some(code) => codes.push(code.to_string()),
            None => skipped.push(ch),
        }
    }

    (codes, skipped)
}
