// Layout engine: résumé record in, paginated display list out.
// Every renderer threads one `RenderCursor`; `cursor::RenderCursor::ensure_space`
// is the only page-break primitive. CPU-bound, so async callers use spawn_blocking.

pub mod canvas;
pub mod cursor;
pub mod dates;
pub mod font_metrics;
pub mod generator;
pub mod header;
pub mod keywords;
pub mod sections;
pub mod template;
pub mod text;

// Re-export the public API consumed by the export pipeline and handlers.
pub use cursor::{PageGeometry, PageSize};
pub use generator::{render_resume, RenderOptions};
pub use template::all_templates;
