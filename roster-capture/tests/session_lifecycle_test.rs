//! Capture session lifecycle integration tests
//!
//! Drives sessions through every short sequence of operations and checks that
//! the camera is open exactly while the session is active or capturing.

use std::sync::Arc;

use roster_capture::{
    Camera, CaptureError, CaptureSettings, Frame, MockCamera, SessionState,
};
use roster_directory::fallback_employees;

#[derive(Debug, Clone, Copy)]
enum Op {
    Start,
    Capture,
    Cancel,
}

const OPS: [Op; 3] = [Op::Start, Op::Capture, Op::Cancel];

fn sequences(len: usize) -> Vec<Vec<Op>> {
    if len == 0 {
        return vec![vec![]];
    }
    let mut out = Vec::new();
    for prefix in sequences(len - 1) {
        for op in OPS {
            let mut seq = prefix.clone();
            seq.push(op);
            out.push(seq);
        }
    }
    out
}

#[tokio::test(start_paused = true)]
async fn test_device_open_iff_active_or_capturing() {
    for len in 1..=4 {
        for seq in sequences(len) {
            let device = Arc::new(MockCamera::new("cam-seq"));
            let camera = Camera::new(device.clone());
            let session = camera.session(fallback_employees().remove(0), CaptureSettings::default());

            for op in &seq {
                match op {
                    Op::Start => {
                        let _ = session.start().await;
                    }
                    Op::Capture => {
                        let _ = session.capture().await;
                    }
                    Op::Cancel => session.cancel(),
                }

                let state = session.state();
                assert_eq!(
                    device.open_streams() == 1,
                    state.holds_device(),
                    "sequence {:?} left state {} with {} open streams",
                    seq,
                    state,
                    device.open_streams()
                );
                assert!(device.open_streams() <= 1);
                assert!(device.release_count() <= 1, "sequence {:?} released twice", seq);
            }

            drop(session);
            assert_eq!(device.open_streams(), 0, "sequence {:?} leaked the camera", seq);
            assert_eq!(device.release_count(), device.acquire_count().min(1));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_release_exactly_once_per_trigger() {
    // successful capture
    let device = Arc::new(MockCamera::new("cam"));
    let camera = Camera::new(device.clone());
    let session = camera.session(fallback_employees().remove(0), CaptureSettings::default());
    session.start().await.unwrap();
    session.capture().await.unwrap();
    session.cancel();
    drop(session);
    assert_eq!(device.release_count(), 1);

    // cancel, then unmount
    let device = Arc::new(MockCamera::new("cam"));
    let camera = Camera::new(device.clone());
    let session = camera.session(fallback_employees().remove(0), CaptureSettings::default());
    session.start().await.unwrap();
    session.cancel();
    drop(session);
    assert_eq!(device.release_count(), 1);

    // unmount only
    let device = Arc::new(MockCamera::new("cam"));
    let camera = Camera::new(device.clone());
    let session = camera.session(fallback_employees().remove(0), CaptureSettings::default());
    session.start().await.unwrap();
    drop(session);
    assert_eq!(device.release_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_capture_is_deterministic_for_fixed_frame() {
    let frame = Frame::solid(5, 5, [90, 160, 30, 255]);
    let mut images = Vec::new();

    for _ in 0..2 {
        let device = Arc::new(MockCamera::new("cam").with_frame(frame.clone()));
        let camera = Camera::new(device);
        let session = camera.session(fallback_employees().remove(4), CaptureSettings::default());
        session.start().await.unwrap();

        let image = session.capture().await.unwrap();
        assert_eq!(session.state(), SessionState::Released);
        assert_eq!(
            session.capture().await.err(),
            Some(CaptureError::InvalidState { actual: SessionState::Released })
        );
        assert!(image.data_uri().starts_with("data:image/png;base64,"));
        assert!(image.download_filename().starts_with("verification-5-"));
        images.push(image.png);
    }

    assert_eq!(images[0], images[1]);
}
