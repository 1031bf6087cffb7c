//! 文本归一化
//!
//! 合并连续空白、把本地化数字（波斯数字、阿拉伯-印度数字）转换为 ASCII 数字。

use phf::phf_map;

/// 本地化数字 → ASCII 数字
static LOCALIZED_DIGITS: phf::Map<char, char> = phf_map! {
    // 波斯数字
    '۰' => '0', '۱' => '1', '۲' => '2', '۳' => '3', '۴' => '4',
    '۵' => '5', '۶' => '6', '۷' => '7', '۸' => '8', '۹' => '9',
    // 阿拉伯-印度数字
    '٠' => '0', '١' => '1', '٢' => '2', '٣' => '3', '٤' => '4',
    '٥' => '5', '٦' => '6', '٧' => '7', '٨' => '8', '٩' => '9',
};

/// 将单个字符的本地化数字映射为 ASCII 数字，其他字符原样返回
pub fn map_digit(c: char) -> char {
    LOCALIZED_DIGITS.get(&c).copied().unwrap_or(c)
}

/// 清理并归一化一行文本
///
/// - 每段连续空白折叠为一个空格
/// - 本地化数字替换为 ASCII 数字
/// - 去掉首尾空白
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().map(map_digit));
    }
    out
}
