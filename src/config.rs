//! Configuration management for the proctoring tracker

use crate::constants::{
    DEFAULT_CHEAT_THRESHOLD, DEFAULT_HYSTERESIS_MULTIPLIER, DEFAULT_MAX_HEAD_POSE_STREAK,
    DEFAULT_MAX_MULTI_FACE_FRAMES, DEFAULT_MAX_NO_FACE_FRAMES, DEFAULT_PITCH_DOWN_THRESHOLD_DEGREES,
    DEFAULT_PITCH_UP_THRESHOLD_DEGREES, DEFAULT_SCORE_DECREASE_FACTOR, DEFAULT_SCORE_INCREASE_FACTOR,
    DEFAULT_STREAK_PENALTY_INCREMENT, DEFAULT_YAW_THRESHOLD_DEGREES,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning parameters for the violation tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProctoringConfig {
    /// Consecutive zero-face frames tolerated before a violation fires
    pub max_no_face_frames: u32,

    /// Consecutive multi-face frames tolerated before a violation fires
    pub max_multi_face_frames: u32,

    /// Yaw magnitude (degrees) beyond which the head counts as turned away
    pub yaw_threshold_degrees: f64,

    /// Pitch (degrees) below which the head counts as looking down
    pub pitch_down_threshold_degrees: f64,

    /// Pitch (degrees) above which the head counts as looking up
    pub pitch_up_threshold_degrees: f64,

    /// Suspicion score at or above which a cheating verdict is emitted
    pub cheat_threshold: f64,

    /// Fraction of remaining headroom added to the score per violation frame
    pub score_increase_factor: f64,

    /// Fraction of the score removed per compliant frame
    pub score_decrease_factor: f64,

    /// Multiplier on the decrease factor while the session is flagged
    pub hysteresis_multiplier: f64,

    /// Score added per consecutive head-pose violation frame
    pub streak_penalty_increment: f64,

    /// Cap on the head-pose violation streak
    pub max_head_pose_streak: u32,
}

impl Default for ProctoringConfig {
    fn default() -> Self {
        Self {
            max_no_face_frames: DEFAULT_MAX_NO_FACE_FRAMES,
            max_multi_face_frames: DEFAULT_MAX_MULTI_FACE_FRAMES,
            yaw_threshold_degrees: DEFAULT_YAW_THRESHOLD_DEGREES,
            pitch_down_threshold_degrees: DEFAULT_PITCH_DOWN_THRESHOLD_DEGREES,
            pitch_up_threshold_degrees: DEFAULT_PITCH_UP_THRESHOLD_DEGREES,
            cheat_threshold: DEFAULT_CHEAT_THRESHOLD,
            score_increase_factor: DEFAULT_SCORE_INCREASE_FACTOR,
            score_decrease_factor: DEFAULT_SCORE_DECREASE_FACTOR,
            hysteresis_multiplier: DEFAULT_HYSTERESIS_MULTIPLIER,
            streak_penalty_increment: DEFAULT_STREAK_PENALTY_INCREMENT,
            max_head_pose_streak: DEFAULT_MAX_HEAD_POSE_STREAK,
        }
    }
}

impl ProctoringConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_no_face_frames == 0 {
            return Err(Error::ConfigError(
                "Max no-face frames must be greater than 0".to_string(),
            ));
        }
        if self.max_multi_face_frames == 0 {
            return Err(Error::ConfigError(
                "Max multi-face frames must be greater than 0".to_string(),
            ));
        }
        if self.max_head_pose_streak == 0 {
            return Err(Error::ConfigError(
                "Max head pose streak must be greater than 0".to_string(),
            ));
        }

        if !self.yaw_threshold_degrees.is_finite() || self.yaw_threshold_degrees <= 0.0 {
            return Err(Error::ConfigError(
                "Yaw threshold must be a positive number of degrees".to_string(),
            ));
        }
        if !self.pitch_down_threshold_degrees.is_finite() || !self.pitch_up_threshold_degrees.is_finite() {
            return Err(Error::ConfigError("Pitch thresholds must be finite".to_string()));
        }
        if self.pitch_down_threshold_degrees >= self.pitch_up_threshold_degrees {
            return Err(Error::ConfigError(
                "Pitch down threshold must be below pitch up threshold".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.cheat_threshold) || self.cheat_threshold == 0.0 {
            return Err(Error::ConfigError(
                "Cheat threshold must be between 0.0 (exclusive) and 1.0".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.score_increase_factor) || self.score_increase_factor == 0.0 {
            return Err(Error::ConfigError(
                "Score increase factor must be between 0.0 and 1.0 (exclusive)".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.score_decrease_factor) || self.score_decrease_factor == 0.0 {
            return Err(Error::ConfigError(
                "Score decrease factor must be between 0.0 and 1.0 (exclusive)".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.hysteresis_multiplier) || self.hysteresis_multiplier == 0.0 {
            return Err(Error::ConfigError(
                "Hysteresis multiplier must be between 0.0 (exclusive) and 1.0".to_string(),
            ));
        }
        if !self.streak_penalty_increment.is_finite() || self.streak_penalty_increment < 0.0 {
            return Err(Error::ConfigError(
                "Streak penalty increment must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Exam Proctoring Configuration

# Face-count streak limits
max_no_face_frames: 3
max_multi_face_frames: 3

# Head pose thresholds (degrees)
yaw_threshold_degrees: 50.0
pitch_down_threshold_degrees: -15.0
pitch_up_threshold_degrees: 7000.0

# Scoring
cheat_threshold: 0.6
score_increase_factor: 0.1
score_decrease_factor: 0.05
hysteresis_multiplier: 0.5
streak_penalty_increment: 0.3
max_head_pose_streak: 5
"#;
