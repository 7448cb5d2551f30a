//! Watershed segmentation regression test
//!
//! Runs both marker policies on a step edge and a synthetic ripple surface.
//! After flooding a connected field, no pixel may remain unlabeled.

use graylab_core::{FRaster, LabelField, UNLABELED, WATERSHED_LINE};
use graylab_region::{
    BoundaryPolarity, MarkerPolicy, WatershedOptions, flood, render_labels, watershed_segment,
};
use graylab_test::{RegParams, synth};

#[test]
fn watershed_reg() {
    let mut rp = RegParams::new("watershed");
    let (w, h) = (24u32, 16u32);
    let step = synth::vertical_step(w, h, 40, 200).expect("step");

    // --- Test 1: Low-gradient markers on a step edge ---
    let opts = WatershedOptions::low_gradient();
    let result = watershed_segment(&step, &opts).expect("watershed low_gradient");
    rp.compare_values(0.0, result.labels.count(UNLABELED) as f64, 0.0);
    rp.compare_values(2.0, result.basin_count as f64, 0.0);
    rp.compare_values(
        result.labels.count(WATERSHED_LINE) as f64,
        result.line_pixels as f64,
        0.0,
    );
    for y in 0..h {
        let has_line = (0..w).any(|x| result.labels.get_unchecked(x, y) == WATERSHED_LINE);
        rp.compare_bool(true, has_line);
    }
    // Left half belongs to the first basin, right half to the second
    rp.compare_values(1.0, result.labels.get(0, 0).expect("label") as f64, 0.0);
    rp.compare_values(2.0, result.labels.get(w - 1, h - 1).expect("label") as f64, 0.0);
    for (&l, &v) in result.labels.data().iter().zip(result.rendered.data()) {
        let expected = match l {
            WATERSHED_LINE => 0,
            1 => 127,
            _ => 255,
        };
        rp.compare_values(expected as f64, v as f64, 0.0);
    }
    eprintln!("  low_gradient: {} line pixels", result.line_pixels);

    // --- Test 2: Otsu two-class markers on the same edge ---
    let opts = WatershedOptions::otsu_two_class();
    let result = watershed_segment(&step, &opts).expect("watershed otsu");
    rp.compare_values(0.0, result.labels.count(UNLABELED) as f64, 0.0);
    rp.compare_bool(
        true,
        result.labels.data().iter().all(|&l| l == WATERSHED_LINE || l == 1 || l == 2),
    );
    for (&l, &v) in result.labels.data().iter().zip(result.rendered.data()) {
        if l == WATERSHED_LINE {
            rp.compare_values(255.0, v as f64, 0.0);
        }
    }
    eprintln!(
        "  otsu_two_class: {} basins, {} line pixels",
        result.basin_count, result.line_pixels
    );

    // --- Test 3: Ripple surface gives several basins ---
    let ripple = synth::ripple(48, 40).expect("ripple");
    let opts = WatershedOptions::new().with_markers(MarkerPolicy::LowGradient);
    let result = watershed_segment(&ripple, &opts).expect("watershed ripple");
    rp.compare_values(48.0, result.rendered.width() as f64, 0.0);
    rp.compare_values(40.0, result.rendered.height() as f64, 0.0);
    rp.compare_bool(true, result.basin_count >= 2);
    rp.compare_bool(true, result.line_pixels > 0);
    rp.compare_values(result.basin_count as f64, result.labels.max_label() as f64, 0.0);
    eprintln!(
        "  ripple: {} basins, {} line pixels",
        result.basin_count, result.line_pixels
    );

    // --- Test 4: Flooding from one seed reaches every pixel ---
    let ramp = FRaster::from_data(6, 5, (0..30).map(|i| ((i * 7) % 11) as f32).collect())
        .expect("ramp");
    let mut markers = LabelField::new(6, 5).expect("markers");
    markers.set_unchecked(3, 2, 1);
    let labels = flood(&ramp, markers).expect("flood");
    rp.compare_values(30.0, labels.count(1) as f64, 0.0);

    // --- Test 5: Polarity only affects line pixels ---
    let dark = render_labels(&labels, BoundaryPolarity::Dark).expect("render");
    let bright = render_labels(&labels, BoundaryPolarity::Bright).expect("render");
    rp.compare_rasters(&dark, &bright);

    // --- Test 6: Smoothing disabled still segments ---
    let opts = WatershedOptions::low_gradient().with_smoothing(0.0);
    let result = watershed_segment(&step, &opts).expect("watershed unsmoothed");
    rp.compare_values(0.0, result.labels.count(UNLABELED) as f64, 0.0);
    rp.compare_values(2.0, result.basin_count as f64, 0.0);

    // --- Test 7: No markers leaves everything unlabeled ---
    let opts = WatershedOptions::low_gradient().with_low_gradient_cutoff(0);
    let result = watershed_segment(&step, &opts).expect("watershed without markers");
    rp.compare_values(0.0, result.basin_count as f64, 0.0);
    rp.compare_values(0.0, result.line_pixels as f64, 0.0);
    rp.compare_values((w * h) as f64, result.labels.count(UNLABELED) as f64, 0.0);
    rp.compare_values(0.0, result.rendered.count_nonzero() as f64, 0.0);

    assert!(rp.cleanup(), "watershed regression test failed");
}
