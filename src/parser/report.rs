use crate::models::{Question, Report, MULTIPLE_CHOICE};

/// 汇总题目列表为报告
pub fn build_report(questions: Vec<Question>) -> Report {
    let total_score = questions.iter().filter_map(|q| q.score).sum();

    Report {
        kind: MULTIPLE_CHOICE,
        total_questions: questions.len(),
        total_score,
        questions,
    }
}
