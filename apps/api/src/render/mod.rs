// PDF assembly: document metadata, filenames, and the lopdf writer.
// Runs only after layout has finished, so a failure here never leaves a partial file.

pub mod metadata;
pub mod pdf;

pub use metadata::{default_filename, sanitize_filename, DocumentMetadata};
pub use pdf::encode_pdf;
