//! Constants used throughout the application

/// Consecutive zero-face frames tolerated before a violation fires
pub const DEFAULT_MAX_NO_FACE_FRAMES: u32 = 3;

/// Consecutive multi-face frames tolerated before a violation fires
pub const DEFAULT_MAX_MULTI_FACE_FRAMES: u32 = 3;

/// Yaw magnitude (degrees) beyond which the head counts as turned away
pub const DEFAULT_YAW_THRESHOLD_DEGREES: f64 = 50.0;

/// Pitch (degrees) below which the head counts as looking down
pub const DEFAULT_PITCH_DOWN_THRESHOLD_DEGREES: f64 = -15.0;

/// Pitch (degrees) above which the head counts as looking up.
/// Deliberately extreme: upward tilt is unpenalized in the shipped
/// calibration, and that asymmetry is load-bearing.
pub const DEFAULT_PITCH_UP_THRESHOLD_DEGREES: f64 = 7000.0;

/// Suspicion score at or above which a cheating verdict is emitted
pub const DEFAULT_CHEAT_THRESHOLD: f64 = 0.6;

/// Fraction of the remaining headroom added to the score per violation frame
pub const DEFAULT_SCORE_INCREASE_FACTOR: f64 = 0.1;

/// Fraction of the score removed per compliant frame
pub const DEFAULT_SCORE_DECREASE_FACTOR: f64 = 0.05;

/// Multiplier applied to the decrease factor while the session is flagged,
/// so recovery from a flagged state is slower than the climb into it
pub const DEFAULT_HYSTERESIS_MULTIPLIER: f64 = 0.5;

/// Score added per consecutive head-pose violation frame
pub const DEFAULT_STREAK_PENALTY_INCREMENT: f64 = 0.3;

/// Cap on the head-pose violation streak, bounding penalty growth
pub const DEFAULT_MAX_HEAD_POSE_STREAK: u32 = 5;

/// Cap on the streak-boosted intermediate score before the final clamp
pub const PRE_CLAMP_SCORE_CAP: f64 = 5.0;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
