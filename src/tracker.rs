//! Violation tracker: the per-session streak and suspicion-score state
//! machine behind the proctoring verdicts.
//!
//! Each active exam session owns one [`SessionState`]. Every incoming frame
//! feeds a face count (and, for single-face frames, a head pose) into
//! [`ViolationTracker::analyze`], which updates streak counters, smooths a
//! suspicion score and emits a [`Verdict`]. A session moves between three
//! phases:
//!
//! - **Clean**: score decaying toward zero, no flag set
//! - **Escalating**: score climbing under a sustained pose or presence
//!   violation
//! - **Flagged**: score pinned at the cheat threshold, recovery slowed by
//!   the hysteresis multiplier
//!
//! The smoothing rule is asymmetric on purpose: single-frame jitter in pose
//! estimation must not flip the verdict, a momentary glance away must
//! recover within a few seconds, and a sustained violation must trip within
//! a bounded number of frames.

use crate::config::ProctoringConfig;
use crate::constants::PRE_CLAMP_SCORE_CAP;
use crate::geometry::HeadPose;
use crate::{Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Per-session violation state, keyed by user id in the tracker
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionState {
    /// Consecutive frames with zero faces detected
    pub no_face_streak: u32,
    /// Consecutive frames with more than one face detected
    pub multi_face_streak: u32,
    /// Smoothed evidence of head-pose violation, in [0, 1]
    pub suspicion_score: f64,
    /// True once the score has crossed the cheat threshold (hysteresis)
    pub global_flag: bool,
    /// Consecutive single-face frames with a head-pose violation
    pub head_pose_streak: u32,
}

/// Outcome of analyzing one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether this frame tripped a cheating verdict
    pub cheating_detected: bool,
    /// Human-readable reason ("OK" when nothing fired)
    pub reason: String,
    /// Number of faces seen in the frame
    pub face_count: usize,
    /// Post-update suspicion score
    pub suspicion_score: f64,
}

impl Verdict {
    fn ok(face_count: usize, suspicion_score: f64) -> Self {
        Self {
            cheating_detected: false,
            reason: "OK".to_string(),
            face_count,
            suspicion_score,
        }
    }
}

/// Streak and suspicion-score tracker for all active proctored sessions.
///
/// All session state lives behind one mutex; every operation holds it for
/// O(1) work with no I/O, so the coarse lock is sufficient for the
/// thread-per-request serving model.
pub struct ViolationTracker {
    config: ProctoringConfig,
    sessions: Mutex<HashMap<u64, SessionState>>,
}

impl Default for ViolationTracker {
    fn default() -> Self {
        Self::new(ProctoringConfig::default())
    }
}

impl ViolationTracker {
    /// Create a tracker with the given tuning parameters
    #[must_use]
    pub fn new(config: ProctoringConfig) -> Self {
        Self {
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Get the tracker's configuration
    #[must_use]
    pub fn config(&self) -> &ProctoringConfig {
        &self.config
    }

    /// Create or reset the session state for a user. Idempotent; any prior
    /// state for the user is discarded.
    pub fn initialize(&self, user_id: u64) {
        self.lock_sessions().insert(user_id, SessionState::default());
        info!("Initialized proctoring state for user {user_id}");
    }

    /// Remove the session state for a user. No-op if absent.
    pub fn clear(&self, user_id: u64) {
        if self.lock_sessions().remove(&user_id).is_some() {
            info!("Cleared proctoring state for user {user_id}");
        }
    }

    /// Snapshot the session state for a user, if one exists
    #[must_use]
    pub fn session(&self, user_id: u64) -> Option<SessionState> {
        self.lock_sessions().get(&user_id).copied()
    }

    /// Number of sessions currently tracked
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.lock_sessions().len()
    }

    /// Analyze one frame's worth of geometry for a user and update the
    /// session state.
    ///
    /// `head_pose` is only consulted when `face_count` is exactly 1; a
    /// `None` pose on a single-face frame means the pose fit failed and is
    /// treated as a compliant pose. A missing session is recreated on the
    /// fly, so a lost `initialize` call degrades gracefully.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the head pose angles are not finite.
    /// Rejecting rather than clamping keeps NaN out of the score.
    pub fn analyze(&self, user_id: u64, face_count: usize, head_pose: Option<HeadPose>) -> Result<Verdict> {
        if let Some(pose) = &head_pose {
            if !pose.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "non-finite head pose angles (pitch={}, yaw={})",
                    pose.pitch, pose.yaw
                )));
            }
        }

        let mut sessions = self.lock_sessions();
        let state = sessions.entry(user_id).or_insert_with(|| {
            debug!("Recreated missing proctoring state for user {user_id}");
            SessionState::default()
        });

        let verdict = if face_count == 0 {
            Self::track_no_face(&self.config, state, user_id)
        } else if face_count > 1 {
            Self::track_multi_face(&self.config, state, user_id, face_count)
        } else {
            Self::score_single_face(&self.config, state, user_id, head_pose)
        };

        debug!(
            "User {user_id}: faces={face_count} score={:.3} flag={} streaks=({}, {}, {})",
            state.suspicion_score,
            state.global_flag,
            state.no_face_streak,
            state.multi_face_streak,
            state.head_pose_streak
        );

        Ok(verdict)
    }

    /// Zero-face branch: streak up, everything pose-related is meaningless
    fn track_no_face(config: &ProctoringConfig, state: &mut SessionState, user_id: u64) -> Verdict {
        state.no_face_streak += 1;
        state.multi_face_streak = 0;
        state.head_pose_streak = 0;

        if state.no_face_streak >= config.max_no_face_frames {
            state.suspicion_score = config.cheat_threshold;
            state.global_flag = true;
            let reason = format!(
                "No face detected ({}/{})",
                state.no_face_streak, config.max_no_face_frames
            );
            info!("User {user_id} violation: {reason}");
            Verdict {
                cheating_detected: true,
                reason,
                face_count: 0,
                suspicion_score: state.suspicion_score,
            }
        } else {
            // Below the limit there is no reliable signal; back off
            state.suspicion_score = 0.0;
            Verdict::ok(0, 0.0)
        }
    }

    /// Multi-face branch, symmetric to the zero-face one
    fn track_multi_face(
        config: &ProctoringConfig,
        state: &mut SessionState,
        user_id: u64,
        face_count: usize,
    ) -> Verdict {
        state.multi_face_streak += 1;
        state.no_face_streak = 0;
        state.head_pose_streak = 0;

        if state.multi_face_streak >= config.max_multi_face_frames {
            state.suspicion_score = config.cheat_threshold;
            state.global_flag = true;
            let reason = format!(
                "Multiple faces detected ({}/{})",
                state.multi_face_streak, config.max_multi_face_frames
            );
            info!("User {user_id} violation: {reason}");
            Verdict {
                cheating_detected: true,
                reason,
                face_count,
                suspicion_score: state.suspicion_score,
            }
        } else {
            state.suspicion_score = 0.0;
            Verdict::ok(face_count, 0.0)
        }
    }

    /// Single-face branch: the smoothed, streak-boosted score update
    fn score_single_face(
        config: &ProctoringConfig,
        state: &mut SessionState,
        user_id: u64,
        head_pose: Option<HeadPose>,
    ) -> Verdict {
        state.no_face_streak = 0;
        state.multi_face_streak = 0;

        let yaw_violation = head_pose.is_some_and(|p| p.yaw.abs() > config.yaw_threshold_degrees);
        let pitch_violation = head_pose.is_some_and(|p| {
            p.pitch < config.pitch_down_threshold_degrees || p.pitch > config.pitch_up_threshold_degrees
        });
        let pose_violation = yaw_violation || pitch_violation;

        if pose_violation {
            state.head_pose_streak = (state.head_pose_streak + 1).min(config.max_head_pose_streak);
        } else if state.suspicion_score <= config.cheat_threshold {
            // The threshold branch below owns the reset once the score is over
            state.head_pose_streak = 0;
        }

        let mut score = state.suspicion_score;
        if pose_violation {
            score += config.score_increase_factor * (1.0 - score);
        } else {
            let mut decrease = config.score_decrease_factor;
            if state.global_flag {
                // Recovery from a flagged state is deliberately slower
                decrease *= config.hysteresis_multiplier;
            }
            score *= 1.0 - decrease;
        }
        score = score.clamp(0.0, 1.0);

        if state.head_pose_streak > 0 {
            score += f64::from(state.head_pose_streak) * config.streak_penalty_increment;
            score = score.min(PRE_CLAMP_SCORE_CAP);
        }
        score = score.clamp(0.0, 1.0);

        if score >= config.cheat_threshold {
            state.global_flag = true;
            state.head_pose_streak = 0;
            // Snap to the threshold so the score never accumulates past it
            // and decay back under it takes a predictable number of frames
            state.suspicion_score = config.cheat_threshold;

            let mut parts = Vec::new();
            if yaw_violation {
                parts.push("turned away");
            }
            if pitch_violation {
                parts.push("looking down");
            }
            let reason = if parts.is_empty() {
                format!("Suspicious activity (score {score:.2})")
            } else {
                format!("Head {} (score {score:.2})", parts.join(" and "))
            };
            info!("User {user_id} violation: {reason}");

            Verdict {
                cheating_detected: true,
                reason,
                face_count: 1,
                suspicion_score: state.suspicion_score,
            }
        } else {
            state.global_flag = false;
            state.suspicion_score = score;
            Verdict::ok(1, score)
        }
    }

    /// Session state is plain data, so a poisoned lock is still usable
    fn lock_sessions(&self) -> MutexGuard<'_, HashMap<u64, SessionState>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
