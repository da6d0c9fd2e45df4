//! Progress Listener Port - stage-by-stage progress of a run.

use crate::domain::catalog::StageDefinition;

/// Receives progress notifications while the pipeline runs.
///
/// `index` is zero-based; `total` is the catalog length.
pub trait ProgressListener: Send + Sync {
    fn on_stage_started(&self, index: usize, total: usize, stage: &StageDefinition);

    fn on_stage_finished(&self, index: usize, total: usize, stage: &StageDefinition, succeeded: bool);
}

/// Listener that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgressListener;

impl ProgressListener for NoOpProgressListener {
    fn on_stage_started(&self, _index: usize, _total: usize, _stage: &StageDefinition) {}

    fn on_stage_finished(&self, _index: usize, _total: usize, _stage: &StageDefinition, _succeeded: bool) {}
}
