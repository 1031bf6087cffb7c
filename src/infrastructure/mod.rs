pub mod ocr_engine;
pub mod pdf_toolkit;
pub mod source_loader;
pub mod temp_file;

pub use ocr_engine::{engines_from_config, OcrEngine, TesseractEngine, VisionOcrEngine};
pub use pdf_toolkit::PdfToolkit;
pub use source_loader::{LoadedSource, SourceKind, SourceLoader};
pub use temp_file::TempFile;
