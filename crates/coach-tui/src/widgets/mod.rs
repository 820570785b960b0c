//! UI widgets

pub mod input_box;
pub mod progress;
pub mod spinner;
pub mod transcript;

pub use input_box::InputBox;
pub use progress::{ModuleEntry, ProgressPanel, ProgressSnapshot};
pub use spinner::Spinner;
pub use transcript::{Role, TranscriptView, Turn, transcript_height};
