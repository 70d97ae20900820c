//! Behavioural tests for the embedder, the similarity engine and the hybrid
//! scorer, exercised through the public API only.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use pose_similarity::skeleton::body25;
use pose_similarity::{
    compute_hybrid_similarity, compute_hybrid_similarity_detailed, compute_sequence_similarity,
    HybridScorer, HybridWeights, JointPair, JointTriplet, KeypointFrame, PoseEmbedder,
    SimilarityConfig, SimilarityEngine, SimilarityError, SimilarityMethod, SkeletonLayout,
    BODY25_FRAME_LEN,
};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// =============================================================================
// FRAME GENERATORS
// =============================================================================

/// T-pose: both arms horizontal, every other joint undetected.
fn t_pose() -> KeypointFrame {
    let mut coords = vec![0.0; BODY25_FRAME_LEN];
    let arm = [
        (body25::RIGHT_WRIST, 100.0),
        (body25::RIGHT_ELBOW, 150.0),
        (body25::RIGHT_SHOULDER, 200.0),
        (body25::LEFT_SHOULDER, 300.0),
        (body25::LEFT_ELBOW, 350.0),
        (body25::LEFT_WRIST, 400.0),
    ];
    for (joint, x) in arm {
        coords[joint * 2] = x;
        coords[joint * 2 + 1] = 200.0;
    }
    KeypointFrame::new(coords)
}

/// Reproducible pseudo-random frames, with some joints dropped to zero.
fn noisy_sequence(n: usize, seed: u64) -> Vec<KeypointFrame> {
    (0..n)
        .map(|i| {
            let coords = (0..BODY25_FRAME_LEN / 2)
                .flat_map(|j| {
                    let mut hasher = DefaultHasher::new();
                    (seed, i, j).hash(&mut hasher);
                    let h = hasher.finish();
                    if h % 7 == 0 {
                        return [0.0, 0.0];
                    }
                    let x = ((h & 0xFFFF) as f64 / 65535.0 - 0.3) * 640.0;
                    let y = (((h >> 16) & 0xFFFF) as f64 / 65535.0 - 0.3) * 360.0;
                    [x, y]
                })
                .collect();
            KeypointFrame::new(coords)
        })
        .collect()
}

/// Smooth arm-raising motion.
fn arm_raise(n: usize) -> Vec<KeypointFrame> {
    (0..n)
        .map(|i| {
            let lift = i as f64 / n as f64 * 80.0;
            let mut coords = t_pose().as_slice().to_vec();
            coords[body25::NECK * 2] = 250.0;
            coords[body25::NECK * 2 + 1] = 190.0;
            coords[body25::MID_HIP * 2] = 250.0;
            coords[body25::MID_HIP * 2 + 1] = 400.0;
            for joint in [body25::RIGHT_WRIST, body25::LEFT_WRIST] {
                coords[joint * 2 + 1] -= lift;
            }
            for joint in [body25::RIGHT_ELBOW, body25::LEFT_ELBOW] {
                coords[joint * 2 + 1] -= lift / 2.0;
            }
            KeypointFrame::new(coords)
        })
        .collect()
}

// =============================================================================
// POSE EMBEDDER
// =============================================================================

#[test]
fn test_all_zero_frame_embeds_to_sentinel_for_any_layout() {
    let layouts = [
        SkeletonLayout::body25(),
        SkeletonLayout::body25().with_limb_pairs(vec![JointPair::new(0, 1)]),
        SkeletonLayout::body25().with_limb_pairs(vec![]),
    ];
    for layout in layouts {
        let embedder = PoseEmbedder::new(layout);
        let emb = embedder.embed_limb_directions(&KeypointFrame::missing(25));
        assert!(emb.is_zero());
        assert_eq!(emb.dim(), embedder.limb_dim());
    }
}

#[test]
fn test_limb_components_are_exact_differences() {
    let embedder = PoseEmbedder::default();
    for frame in arm_raise(6) {
        let emb = embedder.embed_limb_directions(&frame);
        for (i, pair) in embedder.layout().limb_pairs.iter().enumerate() {
            match (frame.detected(pair.from), frame.detected(pair.to)) {
                (Some(a), Some(b)) => assert_eq!(emb.limb(i), Some(b - a)),
                _ => assert!(emb.limb(i).unwrap().iter().all(|&v| v == 0.0)),
            }
        }
    }
}

#[test]
fn test_joint_angles_stay_in_range() {
    let embedder = PoseEmbedder::default();
    for frame in noisy_sequence(20, 3) {
        let angles = embedder.embed_joint_angles(&frame);
        assert_eq!(angles.as_slice().len(), 4);
        for &a in angles.as_slice() {
            assert!((0.0..=std::f64::consts::PI).contains(&a));
        }
    }
}

// =============================================================================
// SEQUENCE SIMILARITY ENGINE
// =============================================================================

#[test]
fn test_directional_self_similarity() {
    for seq in [arm_raise(10), noisy_sequence(10, 11)] {
        let s = compute_sequence_similarity(&seq, &seq, SimilarityMethod::Directional).unwrap();
        assert_relative_eq!(s, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn test_scores_bounded_for_arbitrary_input() {
    let engine = SimilarityEngine::default();
    for seed in 0..8 {
        let a = noisy_sequence(6 + seed as usize, seed);
        let b = noisy_sequence(9, seed + 100);
        for method in SimilarityMethod::ALL {
            let s = engine.similarity(&a, &b, method).unwrap();
            assert!((0.0..=1.0).contains(&s), "{method} gave {s}");
        }
    }
}

#[test]
fn test_invalid_method_is_an_error() {
    let seq = arm_raise(5);
    let err = SimilarityEngine::default()
        .similarity_by_name(&seq, &seq, "manhattan")
        .unwrap_err();
    assert!(matches!(err, SimilarityError::InvalidMethod(_)));
}

#[test]
fn test_legacy_method_names() {
    let seq = arm_raise(5);
    let engine = SimilarityEngine::default();
    for (name, method) in [
        ("cosine", SimilarityMethod::Directional),
        ("euclidean", SimilarityMethod::Positional),
        ("angle", SimilarityMethod::Angular),
    ] {
        assert_eq!(
            engine.similarity_by_name(&seq, &seq, name).unwrap(),
            engine.similarity(&seq, &seq, method).unwrap()
        );
    }
}

#[test]
fn test_alternate_skeleton_layout() {
    // Three-joint arm: shoulder, elbow, wrist.
    let layout = SkeletonLayout {
        num_joints: 3,
        limb_pairs: vec![JointPair::new(0, 1), JointPair::new(1, 2)],
        articulation_triplets: vec![JointTriplet::new(0, 1, 2)],
        posture_triplets: vec![JointTriplet::new(0, 1, 2)],
    };
    let engine = SimilarityEngine::new(layout.clone(), SimilarityConfig::default()).unwrap();

    let bent = KeypointFrame::from_points(&[[0.0, 1.0], [1.0, 1.0], [0.0, 2.0]]);
    let straight = KeypointFrame::from_points(&[[0.0, 1.0], [1.0, 1.0], [2.0, 1.0]]);

    let same = engine
        .similarity(&[bent.clone()], &[bent.clone()], SimilarityMethod::Angular)
        .unwrap();
    let opposed = engine
        .similarity(&[bent.clone()], &[straight], SimilarityMethod::Angular)
        .unwrap();
    assert_relative_eq!(same, 1.0, epsilon = 1e-6);
    assert_eq!(opposed, 0.0);

    let angles = PoseEmbedder::new(layout).embed_joint_angles(&bent);
    assert_relative_eq!(angles.as_slice()[0], std::f64::consts::FRAC_PI_4, epsilon = 1e-12);
}

// =============================================================================
// HYBRID SCORER
// =============================================================================

#[test]
fn test_t_pose_scenario() {
    let seq = vec![t_pose(); 5];
    let b = compute_hybrid_similarity_detailed(&seq, &seq, None).unwrap();

    assert_relative_eq!(b.directional, 1.0, epsilon = 1e-9);
    assert_relative_eq!(b.positional, 1.0, epsilon = 1e-9);
    assert!(b.angular >= 0.99, "angular {}", b.angular);
    assert_abs_diff_eq!(b.hybrid, 1.0, epsilon = 1e-3);
}

#[test]
fn test_zero_reference_scenario() {
    let reference = vec![KeypointFrame::missing(25); 5];
    let live = arm_raise(5);

    let directional =
        compute_sequence_similarity(&reference, &live, SimilarityMethod::Directional).unwrap();
    assert_eq!(directional, 0.0);

    let hybrid = compute_hybrid_similarity(&reference, &live, None).unwrap();
    assert!(hybrid.is_finite());
    assert!((0.0..=1.0).contains(&hybrid));
}

#[test]
fn test_empty_sequences_score_zero() {
    let seq = arm_raise(5);
    assert_eq!(compute_hybrid_similarity(&[], &seq, None).unwrap(), 0.0);
    assert_eq!(compute_hybrid_similarity(&seq, &[], None).unwrap(), 0.0);
}

#[test]
fn test_truncation_idempotence() {
    let a = arm_raise(6);
    let mut b = noisy_sequence(6, 5);
    b.extend(noisy_sequence(9, 6));

    let full = compute_hybrid_similarity(&a, &b, None).unwrap();
    let cut = compute_hybrid_similarity(&a, &b[..a.len()], None).unwrap();
    assert_eq!(full, cut);
}

#[test]
fn test_hybrid_bounded_by_weight_sum() {
    let (a, b) = (arm_raise(8), noisy_sequence(8, 21));
    for w in [(0.5, 0.25, 0.25), (1.0, 1.0, 1.0), (2.0, 0.0, 0.5)] {
        let weights = HybridWeights::from(w);
        let s = compute_hybrid_similarity(&a, &b, Some(&weights)).unwrap();
        assert!(s >= 0.0 && s <= weights.sum() + 1e-12);
    }
}

#[test]
fn test_different_motion_scores_lower() {
    let reference = arm_raise(12);
    let same = compute_hybrid_similarity(&reference, &arm_raise(12), None).unwrap();
    let other = compute_hybrid_similarity(&reference, &noisy_sequence(12, 8), None).unwrap();
    assert!(other < same);
}

#[test]
fn test_concurrent_scoring_shares_no_state() {
    let scorer = Arc::new(HybridScorer::default());
    let reference = Arc::new(arm_raise(10));
    let expected = scorer.score(&reference, &noisy_sequence(10, 0)).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let scorer = Arc::clone(&scorer);
                let reference = Arc::clone(&reference);
                scope.spawn(move || scorer.score(&reference, &noisy_sequence(10, 0)).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_caller_sequences_are_not_modified() {
    let a = arm_raise(5);
    let b = noisy_sequence(5, 2);
    let (a_before, b_before) = (a.clone(), b.clone());
    compute_hybrid_similarity(&a, &b, None).unwrap();
    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}
