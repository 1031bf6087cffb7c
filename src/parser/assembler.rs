//! 题目组装
//!
//! 单次从左到右扫描：遇到题目行时收尾上一题并开始新题，
//! 遇到选项行时写入当前题目的选项集合。

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::{ChoiceLabel, Choices, Question};
use crate::parser::classifier::{classify, LineKind};
use crate::parser::normalizer::clean_text;

/// 行首题号
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+").expect("static regex"));

/// 分值标注：(2 نمره)、-1/5-、(0.5) 等
static SCORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[(\-]([0-9]+(?:[/.][0-9]+)?)\s*(?:نمره|score)?[)\-]").expect("static regex")
});

/// 题干前缀：题号、分隔符、括号内的分值
static QUESTION_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+[\-.]?\s*(?:\([0-9]+(?:[/.][0-9]+)?\s*(?:نمره|score)?\))?\s*")
        .expect("static regex")
});

/// 组装器状态
enum State {
    /// 尚未遇到任何题目
    Idle,
    /// 正在组装一道题
    InQuestion(QuestionBuilder),
}

/// 单道题的累加器
struct QuestionBuilder {
    number: Option<u64>,
    score: Option<f64>,
    text: String,
    choices: Choices,
}

impl QuestionBuilder {
    /// 从题目首行创建（行已归一化且以数字开头）
    fn from_first_line(line: &str) -> Self {
        // 全是 ASCII 数字，只可能溢出；超长题号饱和为 u64::MAX
        let number = NUMBER_RE
            .find(line)
            .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX));

        let text = clean_text(&QUESTION_PREFIX_RE.replace(line, ""));

        Self {
            number,
            score: extract_score(line),
            text,
            choices: Choices::new(),
        }
    }

    /// 追加题干续行
    fn push_text(&mut self, part: &str) {
        if part.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(part);
    }

    fn finish(self) -> Question {
        Question {
            number: self.number,
            score: self.score,
            text: self.text,
            choices: self.choices,
        }
    }
}

/// 从题目首行提取分值
///
/// 分隔符 `/` 视为小数点；无法解析时返回 None。
pub fn extract_score(line: &str) -> Option<f64> {
    let caps = SCORE_RE.captures(line)?;
    let raw = caps.get(1)?.as_str().replace('/', ".");
    raw.parse::<f64>().ok()
}

/// 去掉选项行开头的标点、标签与其后的标点
pub fn strip_choice_label(line: &str, prefix: &str) -> String {
    let is_open = |c: char| matches!(c, '(' | '-' | '.') || c.is_whitespace();
    let is_close = |c: char| matches!(c, ')' | '-' | '.') || c.is_whitespace();

    let rest = line.trim_start_matches(is_open);
    let rest = rest.strip_prefix(prefix).unwrap_or(rest);
    clean_text(rest.trim_start_matches(is_close))
}

/// 将原始行组装为题目列表
pub fn assemble<'a, I>(raw_lines: I) -> Vec<Question>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut questions = Vec::new();
    let mut state = State::Idle;
    let mut lines = raw_lines.into_iter().peekable();

    while let Some(raw) = lines.next() {
        let line = clean_text(raw);
        if line.is_empty() {
            continue;
        }

        match classify(&line) {
            LineKind::QuestionStart => {
                if let State::InQuestion(builder) = std::mem::replace(&mut state, State::Idle) {
                    questions.push(builder.finish());
                }

                let mut builder = QuestionBuilder::from_first_line(&line);

                // 吸收题干续行，直到空行或选项行
                while let Some(next) = lines.peek() {
                    if next.trim().is_empty() {
                        break;
                    }
                    let cleaned = clean_text(next);
                    if ChoiceLabel::starts_any(&cleaned) {
                        break;
                    }
                    builder.push_text(&cleaned);
                    lines.next();
                }

                debug!(
                    "识别到题目: 题号 {:?}, 分值 {:?}",
                    builder.number, builder.score
                );
                state = State::InQuestion(builder);
            }
            LineKind::ChoiceStart { label, prefix } => match &mut state {
                State::InQuestion(builder) => {
                    builder
                        .choices
                        .insert(label, strip_choice_label(&line, prefix));
                }
                State::Idle => {
                    debug!("题目出现前的选项行，已忽略: {}", line);
                }
            },
            LineKind::Continuation => {}
        }
    }

    if let State::InQuestion(builder) = state {
        questions.push(builder.finish());
    }

    questions
}
