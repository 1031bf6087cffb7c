pub mod tts_client;

pub use tts_client::{TtsBackend, TtsClient};
