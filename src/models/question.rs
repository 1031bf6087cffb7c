use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::choice::ChoiceLabel;

/// 报告类型标记
pub const MULTIPLE_CHOICE: &str = "multiple_choice";

/// 一道题的选项集合
///
/// 键唯一，保持插入顺序；同一标签再次出现时覆盖原文本，位置不变。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Choices {
    entries: Vec<(ChoiceLabel, String)>,
}

impl Choices {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入选项，已存在则覆盖
    pub fn insert(&mut self, label: ChoiceLabel, text: impl Into<String>) {
        let text = text.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((label, text)),
        }
    }

    pub fn get(&self, label: ChoiceLabel) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, text)| text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = ChoiceLabel> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }
}

// 序列化为以波斯语标签为键的 JSON 对象
impl Serialize for Choices {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, text) in &self.entries {
            map.serialize_entry(label.as_str(), text)?;
        }
        map.end()
    }
}

/// 解析出的单道选择题
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    /// 题号（未识别到行首数字时为 null）
    #[serde(rename = "question_number")]
    pub number: Option<u64>,
    /// 分值（题目首行无分值标注时为 null）
    pub score: Option<f64>,
    /// 题干
    #[serde(rename = "question_text")]
    pub text: String,
    pub choices: Choices,
}

/// 选择题解析报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub total_questions: usize,
    pub total_score: f64,
    pub questions: Vec<Question>,
}

impl Report {
    /// 是否没有解析出任何题目
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断题干以便日志显示（最多40个字符）
        let preview = if self.text.chars().count() > 40 {
            self.text.chars().take(40).collect::<String>() + "..."
        } else {
            self.text.clone()
        };

        match (self.number, self.score) {
            (Some(n), Some(s)) => write!(f, "#{} [{} 分] {} ({} 个选项)", n, s, preview, self.choices.len()),
            (Some(n), None) => write!(f, "#{} {} ({} 个选项)", n, preview, self.choices.len()),
            _ => write!(f, "{} ({} 个选项)", preview, self.choices.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_overwrite_keeps_position() {
        let mut choices = Choices::new();
        choices.insert(ChoiceLabel::Alef, "x");
        choices.insert(ChoiceLabel::Be, "y");
        choices.insert(ChoiceLabel::Alef, "z");

        assert_eq!(choices.len(), 2);
        assert_eq!(choices.get(ChoiceLabel::Alef), Some("z"));
        let labels: Vec<_> = choices.labels().collect();
        assert_eq!(labels, vec![ChoiceLabel::Alef, ChoiceLabel::Be]);
    }

    #[test]
    fn test_question_json_shape() {
        let mut choices = Choices::new();
        choices.insert(ChoiceLabel::Pe, "سبز");
        let question = Question {
            number: None,
            score: None,
            text: "متن".to_string(),
            choices,
        };

        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "question_number": null,
                "score": null,
                "question_text": "متن",
                "choices": { "پ": "سبز" }
            })
        );
    }
}
