//! Per-frame analysis pipeline: geometry estimation feeding the tracker.
//!
//! This is the glue the exam-session layer drives once per uploaded frame.
//! Estimator failures (undecodable image, model failure) surface as errors
//! distinct from a cheating verdict; only a successful estimate reaches the
//! tracker.

use crate::geometry::GeometryEstimator;
use crate::tracker::{Verdict, ViolationTracker};
use crate::Result;
use log::debug;
use std::sync::Arc;

/// Frame-analysis pipeline for proctored exam sessions.
///
/// Owns a geometry estimator and shares a [`ViolationTracker`] with any
/// other pipelines serving the same process, so verdicts for a user are
/// consistent regardless of which pipeline handled the frame.
pub struct ProctoringPipeline {
    estimator: Box<dyn GeometryEstimator>,
    tracker: Arc<ViolationTracker>,
}

impl ProctoringPipeline {
    /// Create a pipeline from an estimator and a shared tracker
    #[must_use]
    pub fn new(estimator: Box<dyn GeometryEstimator>, tracker: Arc<ViolationTracker>) -> Self {
        Self { estimator, tracker }
    }

    /// Access the shared violation tracker
    #[must_use]
    pub fn tracker(&self) -> &Arc<ViolationTracker> {
        &self.tracker
    }

    /// Start a proctored session for a user (the `take` boundary)
    pub fn begin_session(&self, user_id: u64) {
        self.tracker.initialize(user_id);
    }

    /// End a proctored session for a user (the `submit`/`cancel` boundary)
    pub fn end_session(&self, user_id: u64) {
        self.tracker.clear(user_id);
    }

    /// Run one frame through the estimator and the tracker.
    ///
    /// # Errors
    ///
    /// Returns the estimator's error if geometry estimation fails; the
    /// session state is left untouched in that case.
    pub fn process_frame(&mut self, user_id: u64, image: &[u8]) -> Result<Verdict> {
        let geometry = self.estimator.estimate(image)?;
        debug!(
            "Estimator {} saw {} face(s) for user {user_id}",
            self.estimator.name(),
            geometry.face_count
        );
        self.tracker.analyze(user_id, geometry.face_count, geometry.head_pose)
    }
}
