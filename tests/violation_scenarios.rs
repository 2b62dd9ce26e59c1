//! End-to-end proctoring scenarios exercised through the public API

use exam_proctoring::config::ProctoringConfig;
use exam_proctoring::geometry::{FrameGeometry, HeadPose, ScriptedEstimator};
use exam_proctoring::pipeline::ProctoringPipeline;
use exam_proctoring::tracker::ViolationTracker;
use std::sync::Arc;

const USER: u64 = 9;

fn neutral() -> Option<HeadPose> {
    Some(HeadPose::new(0.0, 0.0))
}

#[test]
fn glance_away_recovers_without_a_verdict() {
    let tracker = ViolationTracker::default();
    tracker.initialize(USER);

    // One jittery frame with the head turned
    let verdict = tracker.analyze(USER, 1, Some(HeadPose::new(0.0, 55.0))).unwrap();
    assert!(!verdict.cheating_detected);
    assert!(verdict.suspicion_score > 0.0);

    // Looking back at the camera: the score decays back under 0.05
    let mut frames_to_recover = 0;
    loop {
        let verdict = tracker.analyze(USER, 1, neutral()).unwrap();
        assert!(!verdict.cheating_detected);
        frames_to_recover += 1;
        if verdict.suspicion_score < 0.05 {
            break;
        }
        assert!(frames_to_recover < 200, "decay must be geometric, not stuck");
    }
}

#[test]
fn sustained_violation_trips_then_stays_tripped() {
    let tracker = ViolationTracker::default();
    tracker.initialize(USER);

    let turned = Some(HeadPose::new(0.0, 80.0));
    let mut first_violation_frame = None;
    for frame in 1..=10 {
        let verdict = tracker.analyze(USER, 1, turned).unwrap();
        if verdict.cheating_detected && first_violation_frame.is_none() {
            first_violation_frame = Some(frame);
        }
        if first_violation_frame.is_some() {
            // Once escalated, every further violation frame keeps flagging
            assert!(verdict.cheating_detected, "frame {frame} should still flag");
            assert_eq!(verdict.suspicion_score, tracker.config().cheat_threshold);
        }
    }
    assert_eq!(first_violation_frame, Some(2));
}

#[test]
fn spec_example_three_no_face_frames() {
    let tracker = ViolationTracker::default();
    tracker.initialize(USER);

    let first = tracker.analyze(USER, 0, None).unwrap();
    let second = tracker.analyze(USER, 0, None).unwrap();
    let third = tracker.analyze(USER, 0, None).unwrap();

    assert!(!first.cheating_detected);
    assert!(!second.cheating_detected);
    assert!(third.cheating_detected);
    assert!(third.reason.contains("No face"));
    assert!(third.reason.contains("3/3"));
}

#[test]
fn face_count_violation_overrides_pose_history() {
    let tracker = ViolationTracker::default();
    tracker.initialize(USER);

    // Escalate pose suspicion without tripping
    tracker.analyze(USER, 1, Some(HeadPose::new(0.0, 60.0))).unwrap();
    let state = tracker.session(USER).unwrap();
    assert!(state.head_pose_streak > 0);

    // A second person appears: pose streak is wiped, presence streak rules
    tracker.analyze(USER, 2, None).unwrap();
    let state = tracker.session(USER).unwrap();
    assert_eq!(state.head_pose_streak, 0);
    assert_eq!(state.multi_face_streak, 1);
}

#[test]
fn custom_limits_are_honored() {
    let config = ProctoringConfig {
        max_no_face_frames: 5,
        ..ProctoringConfig::default()
    };
    let tracker = ViolationTracker::new(config);
    tracker.initialize(USER);

    for frame in 1..=4 {
        let verdict = tracker.analyze(USER, 0, None).unwrap();
        assert!(!verdict.cheating_detected, "frame {frame} under the custom limit");
    }
    let verdict = tracker.analyze(USER, 0, None).unwrap();
    assert!(verdict.cheating_detected);
    assert!(verdict.reason.contains("5/5"));
}

#[test]
fn pipeline_session_lifecycle_end_to_end() {
    let tracker = Arc::new(ViolationTracker::default());
    let frames = vec![
        FrameGeometry::single_face(0.0, 0.0),
        FrameGeometry::no_face(),
        FrameGeometry::no_face(),
        FrameGeometry::no_face(),
        FrameGeometry::single_face(0.0, 0.0),
    ];
    let mut pipeline = ProctoringPipeline::new(Box::new(ScriptedEstimator::new(frames)), Arc::clone(&tracker));

    pipeline.begin_session(USER);

    let verdicts: Vec<_> = (0..5).map(|_| pipeline.process_frame(USER, &[]).unwrap()).collect();
    assert!(!verdicts[0].cheating_detected);
    assert!(!verdicts[1].cheating_detected);
    assert!(!verdicts[2].cheating_detected);
    assert!(verdicts[3].cheating_detected);
    // Back to one compliant face: no longer flagging, score decaying
    assert!(!verdicts[4].cheating_detected);
    assert!(verdicts[4].suspicion_score < tracker.config().cheat_threshold);

    pipeline.end_session(USER);
    assert!(tracker.session(USER).is_none());
}

#[test]
fn verdict_serializes_for_the_http_layer() {
    let tracker = ViolationTracker::default();
    tracker.initialize(USER);

    let verdict = tracker.analyze(USER, 1, neutral()).unwrap();
    let yaml = serde_yaml::to_string(&verdict).unwrap();
    assert!(yaml.contains("cheating_detected: false"));
    assert!(yaml.contains("face_count: 1"));
}
