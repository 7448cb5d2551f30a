//! Canny edge detection regression test
//!
//! A constant image has no edges; a sharp vertical step yields one strong
//! column at the boundary and nothing elsewhere.

use graylab_filter::canny::{STRONG, WEAK};
use graylab_filter::{
    CannyOptions, canny, double_threshold, gaussian_smooth, hysteresis, non_max_suppression,
    sobel_gradient,
};
use graylab_test::{RegParams, synth};

#[test]
fn canny_reg() {
    let mut rp = RegParams::new("canny");
    let opts = CannyOptions::default();

    // --- Test 1: Constant image -> all background ---
    let flat = synth::two_level(20, 14, 77, 77).expect("flat");
    let edges = canny(&flat, &opts).expect("canny flat");
    rp.compare_values(0.0, edges.count_nonzero() as f64, 0.0);

    // --- Test 2: Vertical step -> strong column at the boundary ---
    let (w, h) = (16u32, 12u32);
    let step = synth::vertical_step(w, h, 0, 255).expect("step");
    let edges = canny(&step, &opts).expect("canny step");
    rp.compare_values(w as f64, edges.width() as f64, 0.0);
    rp.compare_values(h as f64, edges.height() as f64, 0.0);

    let boundary = [w / 2 - 1, w / 2];
    let mut outside = 0;
    for y in 0..h {
        for x in 0..w {
            let v = edges.get_pixel(x, y).expect("pixel");
            rp.compare_bool(true, v == 0 || v == STRONG);
            if v != 0 && !boundary.contains(&x) {
                outside += 1;
            }
        }
    }
    rp.compare_values(0.0, outside as f64, 0.0);

    for y in 1..h - 1 {
        let hit = boundary
            .iter()
            .any(|&x| edges.get_pixel(x, y).expect("pixel") == STRONG);
        rp.compare_bool(true, hit);
    }
    eprintln!("  step edges: {}", edges.count_nonzero());

    // --- Test 3: Stages compose to the same result ---
    let smoothed = gaussian_smooth(&step.to_fraster_normalized(), 5, 1.0).expect("smooth");
    let grad = sobel_gradient(&smoothed).expect("gradient");
    let suppressed = non_max_suppression(&grad).expect("nms");
    let mut classified = double_threshold(&suppressed, 0.1, 0.3).expect("threshold");
    let before = classified.data().iter().filter(|&&v| v == WEAK).count();
    hysteresis(&mut classified);
    let after = classified.data().iter().filter(|&&v| v == WEAK).count();
    eprintln!("  weak pixels before/after hysteresis: {} / {}", before, after);
    rp.compare_rasters(&edges, &classified);
    rp.compare_values(0.0, after as f64, 0.0);

    assert!(rp.cleanup(), "canny regression test failed");
}
