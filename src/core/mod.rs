// Core extraction exports
pub mod dates;
pub mod extractor;
pub mod watcher;

pub use dates::normalize_date;
pub use extractor::{render_error, render_output, ExtractError, Extraction, Extractor, ERROR_PREFIX};
pub use watcher::{InfoElement, OutputSink, PageWatcher};
