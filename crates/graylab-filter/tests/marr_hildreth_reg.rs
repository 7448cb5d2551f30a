//! Marr-Hildreth edge detection regression test

use graylab_core::ErrorKind;
use graylab_filter::{MarrHildrethOptions, marr_hildreth};
use graylab_test::{RegParams, synth};

#[test]
fn marr_hildreth_reg() {
    let mut rp = RegParams::new("marr_hildreth");

    // --- Test 1: Vertical step -> crossings only near the boundary ---
    let (w, h) = (16u32, 10u32);
    let step = synth::vertical_step(w, h, 0, 255).expect("step");
    let opts = MarrHildrethOptions::new().with_sigma(1.0).with_threshold(0.1);
    let edges = marr_hildreth(&step, &opts).expect("marr_hildreth");
    rp.compare_values(w as f64, edges.width() as f64, 0.0);
    rp.compare_values(h as f64, edges.height() as f64, 0.0);

    let mut far = 0;
    for y in 0..h {
        for x in 0..w {
            let v = edges.get_pixel(x, y).expect("pixel");
            rp.compare_bool(true, v == 0 || v == 255);
            if v != 0 && !(4..12).contains(&x) {
                far += 1;
            }
        }
    }
    rp.compare_values(0.0, far as f64, 0.0);
    for y in 1..h - 1 {
        rp.compare_values(255.0, edges.get_pixel(w / 2, y).expect("pixel") as f64, 0.0);
    }
    eprintln!("  step crossings: {}", edges.count_nonzero());

    // --- Test 2: Outer frame is never marked ---
    for x in 0..w {
        rp.compare_values(0.0, edges.get_pixel(x, 0).expect("pixel") as f64, 0.0);
        rp.compare_values(0.0, edges.get_pixel(x, h - 1).expect("pixel") as f64, 0.0);
    }

    // --- Test 3: A huge threshold suppresses everything ---
    let strict = MarrHildrethOptions::new().with_threshold(10.0);
    let none = marr_hildreth(&step, &strict).expect("marr_hildreth strict");
    rp.compare_values(0.0, none.count_nonzero() as f64, 0.0);

    // --- Test 4: Missing threshold is an error, not an empty map ---
    let missing = MarrHildrethOptions::new().without_threshold();
    match marr_hildreth(&step, &missing) {
        Ok(_) => rp.compare_bool(true, false),
        Err(e) => rp.compare_bool(true, e.kind() == ErrorKind::MissingParameter),
    };

    assert!(rp.cleanup(), "marr_hildreth regression test failed");
}
