//! Otsu threshold regression test
//!
//! Two well-separated peaks give a threshold strictly between them; an
//! already-binary raster is reproduced unchanged; a flat raster maps to 255.

use graylab_threshold::{compute_otsu_threshold, threshold_otsu, threshold_to_binary};
use graylab_test::{RegParams, synth};

#[test]
fn otsu_reg() {
    let mut rp = RegParams::new("otsu");

    // --- Test 1: Two-level histogram ---
    let pixs = synth::two_level(32, 16, 10, 240).expect("two_level");
    let t = compute_otsu_threshold(&pixs).expect("otsu");
    eprintln!("  two-level threshold: {}", t);
    rp.compare_bool(true, t > 10 && t < 240);

    let bin = threshold_otsu(&pixs).expect("threshold_otsu");
    let expected = synth::two_level(32, 16, 0, 255).expect("expected");
    rp.compare_rasters(&expected, &bin);

    // --- Test 2: Binary input is a fixed point ---
    let blocks = synth::blocks(20, 20, &[(2, 3, 5, 4), (11, 9, 6, 8)], 255).expect("blocks");
    let again = threshold_otsu(&blocks).expect("threshold_otsu binary");
    rp.compare_rasters(&blocks, &again);

    // --- Test 3: Flat image -> threshold 0 -> all foreground ---
    let flat = synth::two_level(9, 7, 128, 128).expect("flat");
    rp.compare_values(0.0, compute_otsu_threshold(&flat).expect("otsu") as f64, 0.0);
    let all = threshold_otsu(&flat).expect("threshold_otsu flat");
    rp.compare_values((9 * 7) as f64, all.count_nonzero() as f64, 0.0);

    // --- Test 4: Result is two-level regardless of input ---
    let ripple = synth::ripple(40, 30).expect("ripple");
    let bin = threshold_otsu(&ripple).expect("threshold_otsu ripple");
    rp.compare_bool(true, bin.data().iter().all(|&v| v == 0 || v == 255));
    let t = compute_otsu_threshold(&ripple).expect("otsu ripple");
    let manual = threshold_to_binary(&ripple, t).expect("threshold_to_binary");
    rp.compare_rasters(&manual, &bin);

    assert!(rp.cleanup(), "otsu regression test failed");
}
