use crate::detect::engine::SeverityEngine;

/// Shared per-router state. Cloning is cheap; the dataset is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub engine: SeverityEngine,
}

impl AppState {
    pub fn new(engine: SeverityEngine) -> Self {
        Self { engine }
    }
}
