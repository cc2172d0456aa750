// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::codebook::Codebook;
use crate::dist::l2_norm;
use crate::error::VqError;
use crate::normalize::normalize;
use crate::reconstruct::{reconstruct, EncodedSignal, Reconstructor, SegmentCode};
use crate::train::training_vectors;
use crate::window::WindowFunction;

fn direction_of(values: &[f64], window: &WindowFunction) -> (Vec<f64>, f64) {
    let n = normalize(&window.apply(values).unwrap());
    (n.direction, n.magnitude)
}

#[test]
fn test_exact_match_contributes_centroid_times_magnitude() {
    let window = WindowFunction::generate(4).unwrap();
    let signal = [1.0, 2.0, 3.0, 4.0, -2.0, 5.0, 1.0, 0.5];

    let (d0, m0) = direction_of(&signal[0..4], &window);
    let (d1, m1) = direction_of(&signal[4..8], &window);
    let codebook = Codebook::from_centroids(vec![vec![0.0, 1.0, 0.0, 0.0], d0.clone(), d1.clone()]).unwrap();

    // Non-overlapping hops so each sample sees exactly one contribution
    let out = Reconstructor::new(&window, &codebook)
        .unwrap()
        .with_slide_len(4)
        .unwrap()
        .reconstruct(&signal)
        .unwrap();

    for i in 0..4 {
        assert_eq!(out[i], d0[i] * m0, "sample {i}");
        assert_eq!(out[4 + i], d1[i] * m1, "sample {}", 4 + i);
    }
}

#[test]
fn test_untouched_tail_stays_zero() {
    let window = WindowFunction::generate(4).unwrap();
    let codebook = Codebook::from_centroids(vec![vec![0.0, 0.5, 0.5, 0.0], vec![0.0, 1.0, -1.0, 0.0]]).unwrap();

    // Offsets 0, 2, 4, 6 cover [0, 10); sample 10 is past the last full segment
    let signal: Vec<f64> = (1..=11).map(|i| i as f64).collect();
    let out = reconstruct(&signal, &window, &codebook).unwrap();
    assert_eq!(out.len(), 11);
    assert_eq!(out[10], 0.0);
    assert!(out[1] != 0.0);
}

#[test]
fn test_short_signal_gives_zero_buffer() {
    let window = WindowFunction::generate(8).unwrap();
    let codebook = Codebook::from_centroids(vec![vec![1.0; 8]]).unwrap();
    let out = reconstruct(&[3.0, 1.0, 4.0], &window, &codebook).unwrap();
    assert_eq!(out, vec![0.0; 3]);
    assert!(reconstruct(&[], &window, &codebook).unwrap().is_empty());
}

#[test]
fn test_flat_zero_signal_does_not_abort() {
    let window = WindowFunction::generate(4).unwrap();
    let codebook = Codebook::from_centroids(vec![vec![0.0, 0.7, 0.7, 0.0], vec![0.0, 0.1, 0.0, 0.0]]).unwrap();
    let rec = Reconstructor::new(&window, &codebook).unwrap();

    let encoded = rec.encode(&[0.0; 12]).unwrap();
    assert_eq!(encoded.codes.len(), 5);
    for code in &encoded.codes {
        assert_eq!(code.magnitude, 0.0);
        // Zero direction picks the centroid closest to the origin
        assert_eq!(code.index, 1);
    }
    assert_eq!(rec.decode(&encoded).unwrap(), vec![0.0; 12]);
}

#[test]
fn test_codebook_window_mismatch() {
    let window = WindowFunction::generate(4).unwrap();
    let codebook = Codebook::from_centroids(vec![vec![1.0, 0.0, 0.0]]).unwrap();
    assert!(matches!(
        Reconstructor::new(&window, &codebook),
        Err(VqError::DimensionMismatch { expected: 4, found: 3 })
    ));
}

#[test]
fn test_slide_configuration() {
    let window = WindowFunction::generate(8).unwrap();
    let codebook = Codebook::from_centroids(vec![vec![0.0; 8]]).unwrap();

    let rec = Reconstructor::new(&window, &codebook).unwrap();
    assert_eq!(rec.slide_len(), 4);
    assert_eq!(rec.window_len(), 8);

    let rec = rec.with_slide_ratio(0.25).unwrap();
    assert_eq!(rec.slide_len(), 2);
    let rec = rec.with_slide_ratio(1.0).unwrap();
    assert_eq!(rec.slide_len(), 8);

    for bad in [0.0, -0.5, 1.5, f64::NAN] {
        let r = Reconstructor::new(&window, &codebook).unwrap().with_slide_ratio(bad);
        assert!(matches!(r, Err(VqError::InvalidParameter(_))), "ratio {bad}");
    }
    // floor(8 * 0.1) == 0
    assert!(Reconstructor::new(&window, &codebook).unwrap().with_slide_ratio(0.1).is_err());
    assert!(Reconstructor::new(&window, &codebook).unwrap().with_slide_len(0).is_err());
}

#[test]
fn test_encode_offsets_follow_slide() {
    let window = WindowFunction::generate(6).unwrap();
    let codebook = Codebook::from_centroids(vec![vec![0.0, 0.5, 0.5, 0.5, 0.5, 0.0]]).unwrap();
    let signal: Vec<f64> = (0..20).map(|i| (i as f64).sin()).collect();
    let encoded = Reconstructor::new(&window, &codebook).unwrap().encode(&signal).unwrap();

    assert_eq!(encoded.signal_len, 20);
    assert_eq!(encoded.window_len, 6);
    assert_eq!(encoded.slide_len, 3);
    let offsets: Vec<usize> = encoded.codes.iter().map(|c| c.offset).collect();
    assert_eq!(offsets, vec![0, 3, 6, 9, 12]);
}

#[test]
fn test_decode_rejects_foreign_codes() {
    let window = WindowFunction::generate(4).unwrap();
    let codebook = Codebook::from_centroids(vec![vec![0.0, 1.0, 1.0, 0.0]]).unwrap();
    let rec = Reconstructor::new(&window, &codebook).unwrap();

    let bad_index = EncodedSignal {
        signal_len: 8,
        window_len: 4,
        slide_len: 2,
        codes: vec![SegmentCode { offset: 0, index: 3, magnitude: 1.0 }],
    };
    assert!(matches!(rec.decode(&bad_index), Err(VqError::InvalidParameter(_))));

    let overrun = EncodedSignal {
        codes: vec![SegmentCode { offset: 6, index: 0, magnitude: 1.0 }],
        ..bad_index.clone()
    };
    assert!(matches!(rec.decode(&overrun), Err(VqError::InvalidParameter(_))));

    // Offset so large that offset + window_len wraps
    let wrapping = EncodedSignal {
        codes: vec![SegmentCode { offset: usize::MAX - 1, index: 0, magnitude: 1.0 }],
        ..bad_index.clone()
    };
    assert!(matches!(rec.decode(&wrapping), Err(VqError::InvalidParameter(_))));

    let wrong_window = EncodedSignal { window_len: 5, codes: vec![], ..bad_index };
    assert!(matches!(rec.decode(&wrong_window), Err(VqError::DimensionMismatch { .. })));
}

#[test]
fn test_training_vectors_are_unit_or_zero() {
    let window = WindowFunction::generate(8).unwrap();
    let mut signal: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).cos() * 10.0).collect();
    // A flat stretch long enough to hold whole zero segments
    for v in &mut signal[20..40] {
        *v = 0.0;
    }

    let vectors = training_vectors(&signal, &window, 2).unwrap();
    assert_eq!(vectors.len(), (64 - 8) / 2 + 1);

    let mut zeros = 0;
    for v in &vectors {
        assert_eq!(v.len(), 8);
        let n = l2_norm(v);
        if n == 0.0 {
            zeros += 1;
        } else {
            assert!((n - 1.0).abs() < 1e-12);
        }
    }
    assert!(zeros > 0);

    // Training and matching window a segment identically
    let first = normalize(&window.apply(&signal[0..8]).unwrap());
    assert_eq!(vectors[0], first.direction);
    let codebook = Codebook::from_centroids(vec![vectors[0].clone()]).unwrap();
    let encoded = Reconstructor::new(&window, &codebook)
        .unwrap()
        .encode(&signal)
        .unwrap();
    assert_eq!(encoded.codes[0].magnitude, first.magnitude);

    assert!(matches!(training_vectors(&signal, &window, 0), Err(VqError::InvalidParameter(_))));
}
