use crate::config::Config;
use crate::layout::PageGeometry;

/// Shared application state injected into all route handlers via Axum extractors.
/// Exports carry no shared mutable state; everything here is read-only.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Page size and margins applied to every export.
    pub page_geometry: PageGeometry,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let page_geometry = PageGeometry::for_size(config.page_size);
        AppState {
            config,
            page_geometry,
        }
    }
}
