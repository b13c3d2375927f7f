//! Integration tests for the calibration workflow
//!
//! These tests drive a CalibrationSession the way a tracking loop does:
//! - Alternate left/right evaluations until the session reports complete
//! - Read per-side thresholds and finalize
//! - Skip malformed frames without losing collected samples

use image::{GrayImage, Luma};
use pupil_calibration::calibration::{
    CalibrationPhase, CalibratedThresholds, CANDIDATE_THRESHOLDS, DEFAULT_SAMPLES_PER_SIDE,
};
use pupil_calibration::testing::{uniform_frame, StepBinarizer};
use pupil_calibration::{
    find_best_threshold, CalibrationError, CalibrationSession, EyeFrameBinarizer, EyeSide,
};

/// Synthetic eye crop: dark pupil disk of `radius` on a lighter sclera
fn synthetic_eye(width: u32, height: u32, radius: f32, pupil: u8, sclera: u8) -> GrayImage {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    GrayImage::from_fn(width, height, |x, y| {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        if (dx * dx + dy * dy).sqrt() <= radius {
            Luma([pupil])
        } else {
            Luma([sclera])
        }
    })
}

/// Test the end-to-end scenario with frames that always resolve to 45
#[test]
fn test_full_calibration_workflow() {
    let mut session = CalibrationSession::new_default(StepBinarizer::with_target(45));
    let frame = uniform_frame(30, 30, 128);

    for i in 0..DEFAULT_SAMPLES_PER_SIDE {
        assert!(!session.is_complete());
        session.evaluate(&frame, EyeSide::Left).unwrap();
        assert_eq!(session.samples(EyeSide::Left).len(), i + 1);
    }
    assert!(!session.is_complete());

    for i in 0..DEFAULT_SAMPLES_PER_SIDE {
        assert!(!session.is_complete(), "complete after {} right samples", i);
        session.evaluate(&frame, EyeSide::Right).unwrap();
    }

    assert!(session.is_complete());
    assert_eq!(session.phase(), CalibrationPhase::Ready);
    assert_eq!(session.threshold(EyeSide::Left).unwrap(), 45);
    assert_eq!(session.threshold(EyeSide::Right).unwrap(), 45);
    assert_eq!(
        session.finalize().unwrap(),
        CalibratedThresholds {
            left: 45,
            right: 45
        }
    );
}

/// Interleaved evaluation, as a tracking loop sees both eyes per captured frame
#[test]
fn test_interleaved_sides() {
    let mut session = CalibrationSession::new(StepBinarizer::with_target(60), 5);
    let frame = uniform_frame(30, 30, 0);

    for _ in 0..5 {
        session.evaluate(&frame, EyeSide::Left).unwrap();
        session.evaluate(&frame, EyeSide::Right).unwrap();
    }

    assert!(session.is_complete());
    assert_eq!(session.samples(EyeSide::Left), &[60; 5]);
    assert_eq!(session.samples(EyeSide::Right), &[60; 5]);
}

/// Malformed frames are skipped and calibration continues on the next frame
#[test]
fn test_skip_malformed_frames() {
    let mut session = CalibrationSession::new(StepBinarizer::with_target(45), 2);
    let good = uniform_frame(30, 30, 0);
    let tiny = uniform_frame(10, 10, 0);

    let frames = [&good, &tiny, &good, &tiny, &good, &good];
    let sides = [
        EyeSide::Left,
        EyeSide::Left,
        EyeSide::Left,
        EyeSide::Right,
        EyeSide::Right,
        EyeSide::Right,
    ];

    let mut skipped = 0;
    for (frame, side) in frames.iter().zip(sides) {
        match session.evaluate(frame, side) {
            Ok(_) => {}
            Err(CalibrationError::EmptyMeasurementRegion { .. }) => skipped += 1,
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(skipped, 2);
    assert!(session.is_complete());
}

/// Leaving calibration mode early is refused until both sides are ready
#[test]
fn test_refuse_to_finalize_early() {
    let mut session = CalibrationSession::new_default(StepBinarizer::with_target(45));
    let frame = uniform_frame(30, 30, 0);
    for _ in 0..DEFAULT_SAMPLES_PER_SIDE {
        session.evaluate(&frame, EyeSide::Right).unwrap();
    }

    assert!(matches!(
        session.threshold(EyeSide::Left),
        Err(CalibrationError::InsufficientSamples { .. })
    ));
    assert!(session.finalize().is_err());
}

/// The reference binarizer picks a candidate for a realistic synthetic crop
#[test]
fn test_reference_binarizer_on_synthetic_eye() {
    let binarizer = EyeFrameBinarizer::unsmoothed(0);
    // 60x40 crop, interior 50x30; pupil value 40, sclera 200
    let eye = synthetic_eye(60, 40, 12.0, 40, 200);

    let best = find_best_threshold(&eye, &binarizer).unwrap();
    assert!(CANDIDATE_THRESHOLDS.contains(&best));
    // Below the pupil value nothing is iris; from 40 upward the disk is
    assert!(best >= 40, "threshold {} cannot separate the pupil", best);
    assert!(best < 200);
}

/// Pupil coverage close to the target selects the lowest threshold that captures it
#[test]
fn test_reference_binarizer_gradient_pupil() {
    let binarizer = EyeFrameBinarizer::unsmoothed(0);
    // Interior 20x20 = 400 pixels; one column of 20 pixels per gray level step
    let frame = GrayImage::from_fn(30, 30, |x, _| {
        let col = x.saturating_sub(5).min(19);
        Luma([(col * 5 + 5) as u8])
    });

    // Threshold t darkens every column with value <= t: t / 5 columns of 20 pixels.
    // Ratio 0.45 at 45 and 0.50 at 50, so 50 is closer to 0.48.
    let best = find_best_threshold(&frame, &binarizer).unwrap();
    assert_eq!(best, 50);
}

#[test]
fn test_invalid_raw_side_is_rejected() {
    let mut session = CalibrationSession::new_default(StepBinarizer::with_target(45));
    let frame = uniform_frame(30, 30, 0);

    let err = session.evaluate_tagged(&frame, 7).unwrap_err();
    assert!(matches!(err, CalibrationError::InvalidSide { .. }));
    assert!(session.samples(EyeSide::Left).is_empty());
    assert!(session.samples(EyeSide::Right).is_empty());
}
