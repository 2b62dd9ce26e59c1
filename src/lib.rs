//! Webcam proctoring violation tracking for online exam sessions.
//!
//! This library implements the stateful core of an exam proctoring system:
//! converting a per-frame stream of face-count and head-pose measurements
//! into a smoothed, hysteresis-damped cheating verdict. It deliberately does
//! NOT implement face detection or pose fitting; those live behind the
//! [`geometry::GeometryEstimator`] trait and are supplied by the caller.
//!
//! The pipeline per proctored session is:
//! 1. Session start: the exam layer calls `initialize` for the user
//! 2. Per frame: a geometry estimate (face count plus optional head pose)
//!    feeds [`tracker::ViolationTracker::analyze`]
//! 3. The returned [`tracker::Verdict`] drives the student-facing warning
//!    or cancels the attempt
//! 4. Session end (submit or cancel): `clear` discards the state
//!
//! Violation state is in-memory and session-scoped by design; it does not
//! survive a process restart.
//!
//! # Examples
//!
//! ## Feeding measurements directly
//!
//! ```
//! use exam_proctoring::geometry::HeadPose;
//! use exam_proctoring::tracker::ViolationTracker;
//!
//! # fn main() -> exam_proctoring::Result<()> {
//! let tracker = ViolationTracker::default();
//! let user_id = 17;
//!
//! tracker.initialize(user_id);
//!
//! // A compliant frame: one face, looking at the camera
//! let verdict = tracker.analyze(user_id, 1, Some(HeadPose::new(0.0, 2.5)))?;
//! assert!(!verdict.cheating_detected);
//!
//! // A sustained head turn escalates and trips the verdict
//! tracker.analyze(user_id, 1, Some(HeadPose::new(0.0, 65.0)))?;
//! let verdict = tracker.analyze(user_id, 1, Some(HeadPose::new(0.0, 65.0)))?;
//! assert!(verdict.cheating_detected);
//!
//! tracker.clear(user_id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving a pipeline with an estimator
//!
//! ```
//! use exam_proctoring::geometry::{FrameGeometry, ScriptedEstimator};
//! use exam_proctoring::pipeline::ProctoringPipeline;
//! use exam_proctoring::tracker::ViolationTracker;
//! use std::sync::Arc;
//!
//! # fn main() -> exam_proctoring::Result<()> {
//! let tracker = Arc::new(ViolationTracker::default());
//! let estimator = ScriptedEstimator::new(vec![
//!     FrameGeometry::single_face(0.0, 0.0),
//!     FrameGeometry::no_face(),
//! ]);
//! let mut pipeline = ProctoringPipeline::new(Box::new(estimator), tracker);
//!
//! pipeline.begin_session(17);
//! let verdict = pipeline.process_frame(17, &[])?;
//! assert_eq!(verdict.face_count, 1);
//! pipeline.end_session(17);
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom tuning
//!
//! ```
//! use exam_proctoring::config::ProctoringConfig;
//! use exam_proctoring::tracker::ViolationTracker;
//!
//! let config = ProctoringConfig {
//!     max_no_face_frames: 5,
//!     ..ProctoringConfig::default()
//! };
//! config.validate().unwrap();
//! let tracker = ViolationTracker::new(config);
//! ```

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

/// Error types and result handling
pub mod error;

/// Face geometry types and the estimator trait
pub mod geometry;

/// Per-frame analysis pipeline wiring estimator and tracker
pub mod pipeline;

/// The violation state machine: streaks, suspicion score, verdicts
pub mod tracker;

pub use error::{Error, Result};
