pub mod choice;
pub mod question;

pub use choice::{ChoiceLabel, LABEL_PRIORITY};
pub use question::{Choices, Question, Report, MULTIPLE_CHOICE};
