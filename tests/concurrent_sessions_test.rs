//! Concurrency tests for the shared session registry

use exam_proctoring::geometry::HeadPose;
use exam_proctoring::tracker::ViolationTracker;
use std::sync::Arc;
use std::thread;

#[test]
fn concurrent_users_do_not_interfere() {
    let tracker = Arc::new(ViolationTracker::default());
    let users: Vec<u64> = (1..=8).collect();

    let handles: Vec<_> = users
        .iter()
        .map(|&user_id| {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                tracker.initialize(user_id);
                // Even users stare off-screen, odd users behave
                let pose = if user_id % 2 == 0 {
                    HeadPose::new(0.0, 75.0)
                } else {
                    HeadPose::new(0.0, 0.0)
                };
                let mut flagged = false;
                for _ in 0..50 {
                    let verdict = tracker.analyze(user_id, 1, Some(pose)).unwrap();
                    flagged |= verdict.cheating_detected;
                }
                flagged
            })
        })
        .collect();

    for (user_id, handle) in users.iter().zip(handles) {
        let flagged = handle.join().unwrap();
        assert_eq!(flagged, user_id % 2 == 0, "user {user_id}");
    }

    assert_eq!(tracker.session_count(), 8);
    for &user_id in &users {
        let state = tracker.session(user_id).unwrap();
        assert_eq!(state.global_flag, user_id % 2 == 0, "user {user_id}");
    }
}

#[test]
fn interleaved_init_analyze_clear_is_safe() {
    let tracker = Arc::new(ViolationTracker::default());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                let user_id = 100 + i;
                for _ in 0..100 {
                    tracker.initialize(user_id);
                    tracker.analyze(user_id, 0, None).unwrap();
                    tracker.analyze(user_id, 1, Some(HeadPose::new(0.0, 0.0))).unwrap();
                    tracker.clear(user_id);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(tracker.session_count(), 0);
}
