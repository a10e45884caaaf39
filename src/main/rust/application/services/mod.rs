mod grid_orchestrator;

pub use grid_orchestrator::{GridOrchestrator, GridTile, ReconcileSummary};
