/// 选项标签枚举
///
/// 试卷上的选项使用波斯字母编号：الف، ب، پ، ت، ج، د。
/// 前四个标签还接受拉丁字母和数字别名（a/A/۱/1 → الف 等）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ChoiceLabel {
    /// الف
    Alef,
    /// ب
    Be,
    /// پ
    Pe,
    /// ت
    Te,
    /// ج
    Jim,
    /// د
    Dal,
}

/// 标签匹配表：按优先级排列，先匹配者胜出
///
/// 每一项为 (标签, 可接受的前缀)。数字别名同时列出波斯数字与 ASCII 数字，
/// 这样即使输入未经过数字归一化也能识别。
pub const LABEL_PRIORITY: [(ChoiceLabel, &[&str]); 6] = [
    (ChoiceLabel::Alef, &["الف", "a", "A", "۱", "1"]),
    (ChoiceLabel::Be, &["ب", "b", "B", "۲", "2"]),
    (ChoiceLabel::Pe, &["پ", "c", "C", "۳", "3"]),
    (ChoiceLabel::Te, &["ت", "d", "D", "۴", "4"]),
    (ChoiceLabel::Jim, &["ج"]),
    (ChoiceLabel::Dal, &["د"]),
];

impl ChoiceLabel {
    /// 获取波斯语标签文本（JSON 输出中的键）
    pub fn as_str(self) -> &'static str {
        match self {
            ChoiceLabel::Alef => "الف",
            ChoiceLabel::Be => "ب",
            ChoiceLabel::Pe => "پ",
            ChoiceLabel::Te => "ت",
            ChoiceLabel::Jim => "ج",
            ChoiceLabel::Dal => "د",
        }
    }

    /// 按优先级查找行首匹配的标签
    ///
    /// # 返回
    /// 返回 (标签, 实际匹配到的前缀)
    pub fn match_prefix(line: &str) -> Option<(Self, &'static str)> {
        LABEL_PRIORITY.iter().find_map(|(label, aliases)| {
            aliases
                .iter()
                .find(|alias| line.starts_with(**alias))
                .map(|alias| (*label, *alias))
        })
    }

    /// 行首是否为任意已知的选项前缀
    pub fn starts_any(line: &str) -> bool {
        Self::match_prefix(line).is_some()
    }
}

impl std::fmt::Display for ChoiceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_alias_resolves_to_its_group() {
        for (label, aliases) in LABEL_PRIORITY {
            for alias in aliases {
                let line = format!("{}) متن", alias);
                let (matched, prefix) = ChoiceLabel::match_prefix(&line).unwrap();
                assert_eq!(matched, label, "别名 {} 应解析为 {}", alias, label);
                assert_eq!(prefix, *alias);
            }
        }
    }

    #[test]
    fn test_native_only_labels_have_no_aliases() {
        assert_eq!(LABEL_PRIORITY[4], (ChoiceLabel::Jim, &["ج"][..]));
        assert_eq!(LABEL_PRIORITY[5], (ChoiceLabel::Dal, &["د"][..]));
        assert_eq!(ChoiceLabel::match_prefix("j) x"), None);
        assert_eq!(ChoiceLabel::match_prefix("e) x"), None);
    }

    #[test]
    fn test_priority_order() {
        // 数字 1 同时可能是 ASCII 或归一化后的波斯数字，都归到第一组
        assert_eq!(
            ChoiceLabel::match_prefix("1- x").map(|m| m.0),
            Some(ChoiceLabel::Alef)
        );
        assert_eq!(
            ChoiceLabel::match_prefix("۴. x").map(|m| m.0),
            Some(ChoiceLabel::Te)
        );
    }

    #[test]
    fn test_label_text_matches_priority_table() {
        for (label, aliases) in LABEL_PRIORITY {
            assert_eq!(aliases[0], label.as_str());
        }
    }
}
