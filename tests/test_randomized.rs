mod common;

use common::assertions::{assert_focus_bit_identical, focus_origin_col, focus_origin_row};
use common::test_frames::column_coded;
use fovea::{constrain_angle, constrain_angle_f64, FoveaConfig, Foveator, PolePolicy, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn constrain_angle_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10_000 {
        let a = rng.gen_range(-1_000_000..1_000_000);
        let c = constrain_angle(a);
        assert!((0..360).contains(&c), "{a} -> {c}");
        assert_eq!(constrain_angle(c), c);
        assert_eq!((a - c).rem_euclid(360), 0);

        let x: f64 = rng.gen_range(-1.0e6..1.0e6);
        let cx = constrain_angle_f64(x);
        assert!((0.0..360.0).contains(&cx), "{x} -> {cx}");
        assert_eq!(constrain_angle_f64(cx), cx);
    }
}

#[test]
fn random_views_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x00F0_FEA5);
    let source = column_coded(Size::new(720, 360));

    for _ in 0..60 {
        let crop_angle = rng.gen_range(2..=360);
        let config = FoveaConfig {
            crop_angle,
            h_focus_angle: rng.gen_range(1..crop_angle),
            v_focus_angle: rng.gen_range(1..180),
            shrink_factor: rng.gen_range(2..=8),
            pole_policy: PolePolicy::Clamp,
            ..FoveaConfig::default()
        };
        let foveator = Foveator::new(config);
        let az = rng.gen_range(-720..720);
        let el = rng.gen_range(-90..=270);

        let record = foveator
            .optimize_image(&source, az, el)
            .unwrap_or_else(|e| panic!("{config:?} az {az} el {el}: {e}"));
        for (name, panel) in record.panels() {
            assert!(!panel.is_empty(), "{name} empty for {config:?}");
        }
        assert!(record.byte_size() < source.byte_len());

        let decoded = foveator.extract_image(&record).unwrap();
        assert_eq!(decoded.size(), source.size());
        let origin = (focus_origin_col(&record), focus_origin_row(&record));
        assert_focus_bit_identical(&source, &decoded, &record, origin);
    }
}

#[test]
fn reject_policy_only_fails_near_the_poles() {
    let mut rng = StdRng::seed_from_u64(42);
    let source = column_coded(Size::new(720, 360));
    let foveator = Foveator::new(FoveaConfig {
        pole_policy: PolePolicy::Reject,
        ..FoveaConfig::default()
    });

    // 20° patch: rows center-20..center+20 must stay within 1..359
    for _ in 0..100 {
        let el = rng.gen_range(-90..=270);
        let row = el * 2;
        let fits = row - 20 >= 1 && row + 20 <= 359;
        let result = foveator.optimize_image(&source, rng.gen_range(0..360), el);
        assert_eq!(result.is_ok(), fits, "elevation {el}");
    }
}
