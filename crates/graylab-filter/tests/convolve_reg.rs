//! Convolution and kernel regression test
//!
//! Unit impulse is a no-op, output size always matches input, generated
//! kernels are odd-sided and the LoG kernel sums to zero.

use graylab_filter::{Kernel, convolve, convolve_raster, gaussian_smooth};
use graylab_test::{RegParams, synth};

#[test]
fn convolve_reg() {
    let mut rp = RegParams::new("convolve");

    let pixs = synth::ripple(37, 23).expect("ripple");
    let fpix = pixs.to_fraster();

    // --- Test 1: Unit impulse returns the input ---
    for size in [1u32, 3, 5, 9] {
        let k = Kernel::identity(size).expect("identity");
        let out = convolve(&fpix, &k).expect("convolve");
        rp.compare_frasters(&fpix, &out, 0.0);
    }

    // --- Test 2: Output dimensions equal input dimensions ---
    for &sigma in &[0.5f32, 1.0, 2.5] {
        let g = Kernel::gaussian(sigma).expect("gaussian");
        let out = convolve_raster(&pixs, &g).expect("convolve_raster");
        rp.compare_values(37.0, out.width() as f64, 0.0);
        rp.compare_values(23.0, out.height() as f64, 0.0);
        eprintln!("  gaussian sigma={}: kernel {}", sigma, g.size());
    }

    // --- Test 3: Generated kernels are odd; LoG is zero-sum ---
    for &sigma in &[0.3f32, 0.8, 1.0, 1.6, 2.2] {
        let g = Kernel::gaussian(sigma).expect("gaussian");
        let l = Kernel::log(sigma).expect("log");
        rp.compare_values(1.0, (g.size() % 2) as f64, 0.0);
        rp.compare_values(1.0, (l.size() % 2) as f64, 0.0);
        rp.compare_values(0.0, l.sum() as f64, 1e-4);
    }

    // --- Test 4: Even kernel side is rejected ---
    let even = Kernel::new(4);
    rp.compare_bool(true, even.is_err());
    let smoothed = gaussian_smooth(&fpix, 6, 1.0);
    rp.compare_bool(true, smoothed.is_err());

    // --- Test 5: Non-positive sigma is rejected ---
    rp.compare_bool(true, Kernel::gaussian(0.0).is_err());
    rp.compare_bool(true, Kernel::log(-0.5).is_err());
    if let Err(e) = Kernel::gaussian(0.0) {
        rp.compare_bool(true, e.kind() == graylab_core::ErrorKind::InvalidParameter);
    }

    assert!(rp.cleanup(), "convolve regression test failed");
}
