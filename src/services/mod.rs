pub mod document_service;
pub mod speech_service;

pub use document_service::{DocumentService, NO_PDF_TEXT};
pub use speech_service::SpeechService;
