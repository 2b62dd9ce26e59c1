//! Geometry estimator seam between the vision pipeline and the tracker.
//!
//! The tracker only consumes per-frame face counts and head-orientation
//! angles. How those are produced (face detection, landmark fitting, PnP)
//! lives behind the [`GeometryEstimator`] trait so the tracker can be
//! exercised without any camera or model files.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Head orientation of a single detected face, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadPose {
    /// Up/down tilt; negative values look down
    pub pitch: f64,
    /// Left/right turn; zero faces the camera
    pub yaw: f64,
}

impl HeadPose {
    /// Create a new head pose from pitch and yaw angles
    #[must_use]
    pub fn new(pitch: f64, yaw: f64) -> Self {
        Self { pitch, yaw }
    }

    /// True when both angles are finite numbers
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.pitch.is_finite() && self.yaw.is_finite()
    }
}

/// Per-frame output of the geometry estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    /// Number of distinct faces detected in the frame
    pub face_count: usize,
    /// Fitted head orientation when exactly one face is present.
    /// `None` when the fit failed or the face count is not one.
    pub head_pose: Option<HeadPose>,
}

impl FrameGeometry {
    /// Frame with no detected face
    #[must_use]
    pub fn no_face() -> Self {
        Self {
            face_count: 0,
            head_pose: None,
        }
    }

    /// Frame with exactly one face and a fitted pose
    #[must_use]
    pub fn single_face(pitch: f64, yaw: f64) -> Self {
        Self {
            face_count: 1,
            head_pose: Some(HeadPose::new(pitch, yaw)),
        }
    }

    /// Frame with more than one face
    #[must_use]
    pub fn multiple_faces(face_count: usize) -> Self {
        Self {
            face_count,
            head_pose: None,
        }
    }
}

/// Trait for per-frame face geometry estimation
pub trait GeometryEstimator: Send + Sync {
    /// Estimate face count and head pose from a decoded image
    fn estimate(&mut self, image: &[u8]) -> Result<FrameGeometry>;

    /// Get estimator name
    fn name(&self) -> &str;
}

/// Deterministic estimator that replays a prerecorded sequence of frame
/// geometries, ignoring image contents. Used by tests and the trace
/// replay binary in place of a real detector.
pub struct ScriptedEstimator {
    frames: VecDeque<FrameGeometry>,
}

impl ScriptedEstimator {
    /// Create an estimator that yields the given frames in order
    #[must_use]
    pub fn new<I: IntoIterator<Item = FrameGeometry>>(frames: I) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Number of frames left in the script
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl GeometryEstimator for ScriptedEstimator {
    fn estimate(&mut self, _image: &[u8]) -> Result<FrameGeometry> {
        self.frames
            .pop_front()
            .ok_or_else(|| Error::Estimation("Scripted estimator has no frames left".to_string()))
    }

    fn name(&self) -> &str {
        "ScriptedEstimator"
    }
}
