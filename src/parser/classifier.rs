//! 行分类

use crate::models::ChoiceLabel;

/// 单行的分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// 以数字开头：新题目
    QuestionStart,
    /// 以选项前缀开头：新选项
    ChoiceStart {
        label: ChoiceLabel,
        prefix: &'static str,
    },
    /// 其他：题干续行
    Continuation,
}

/// 对归一化后的非空行进行分类
///
/// 数字开头优先于选项前缀，因此 `1)` 这类行总是被当作题目。
pub fn classify(line: &str) -> LineKind {
    if line.starts_with(|c: char| c.is_ascii_digit()) {
        return LineKind::QuestionStart;
    }

    match ChoiceLabel::match_prefix(line) {
        Some((label, prefix)) => LineKind::ChoiceStart { label, prefix },
        None => LineKind::Continuation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_start() {
        assert_eq!(classify("1. سوال"), LineKind::QuestionStart);
        assert_eq!(classify("12- x"), LineKind::QuestionStart);
        // 数字开头先于选项别名
        assert_eq!(classify("2) 4"), LineKind::QuestionStart);
    }

    #[test]
    fn test_choice_start() {
        assert_eq!(
            classify("الف) قرمز"),
            LineKind::ChoiceStart {
                label: ChoiceLabel::Alef,
                prefix: "الف"
            }
        );
        assert_eq!(
            classify("d) 6"),
            LineKind::ChoiceStart {
                label: ChoiceLabel::Te,
                prefix: "d"
            }
        );
        assert_eq!(
            classify("ج- گزینه"),
            LineKind::ChoiceStart {
                label: ChoiceLabel::Jim,
                prefix: "ج"
            }
        );
    }

    #[test]
    fn test_continuation() {
        assert_eq!(classify("Red"), LineKind::Continuation);
        assert_eq!(classify("(ادامه)"), LineKind::Continuation);
        assert_eq!(classify("سوال"), LineKind::Continuation);
    }
}
