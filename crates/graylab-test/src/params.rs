//! Regression test parameters and operations

use graylab_core::{FRaster, LabelField, Raster};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare computed values with expectations (default)
    #[default]
    Compare,
    /// Display mode - run and report, but never record a failure
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "canny")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode (compare or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        if self.mode == RegTestMode::Compare {
            self.failures.push(msg);
            self.success = false;
        }
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Record a boolean expectation
    pub fn compare_bool(&mut self, expected: bool, actual: bool) -> bool {
        let e = if expected { 1.0 } else { 0.0 };
        let a = if actual { 1.0 } else { 0.0 };
        self.compare_values(e, a, 0.0)
    }

    /// Compare two rasters for exact equality
    pub fn compare_rasters(&mut self, r1: &Raster, r2: &Raster) -> bool {
        self.index += 1;

        if r1.dimensions() != r2.dimensions() {
            let msg = format!(
                "Failure in {}_reg: raster comparison for index {} - dimension mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                r1.dimensions(),
                r2.dimensions()
            );
            self.record_failure(msg);
            return false;
        }

        for y in 0..r1.height() {
            for x in 0..r1.width() {
                if r1.get_pixel_unchecked(x, y) != r2.get_pixel_unchecked(x, y) {
                    let msg = format!(
                        "Failure in {}_reg: raster comparison for index {} - pixel mismatch at ({}, {})",
                        self.test_name, self.index, x, y
                    );
                    self.record_failure(msg);
                    return false;
                }
            }
        }

        true
    }

    /// Compare two floating-point rasters within `delta` per pixel
    pub fn compare_frasters(&mut self, f1: &FRaster, f2: &FRaster, delta: f32) -> bool {
        self.index += 1;

        if f1.dimensions() != f2.dimensions() {
            let msg = format!(
                "Failure in {}_reg: fraster comparison for index {} - dimension mismatch",
                self.test_name, self.index
            );
            self.record_failure(msg);
            return false;
        }

        for y in 0..f1.height() {
            for x in 0..f1.width() {
                let a = f1.get_pixel_unchecked(x, y);
                let b = f2.get_pixel_unchecked(x, y);
                if (a - b).abs() > delta {
                    let msg = format!(
                        "Failure in {}_reg: fraster comparison for index {} - ({}, {}): {} vs {}",
                        self.test_name, self.index, x, y, a, b
                    );
                    self.record_failure(msg);
                    return false;
                }
            }
        }

        true
    }

    /// Check that two label fields describe the same partition
    ///
    /// Label numbering may differ; only the grouping of pixels matters.
    pub fn compare_partitions(&mut self, l1: &LabelField, l2: &LabelField) -> bool {
        self.index += 1;

        if l1.dimensions() != l2.dimensions() {
            let msg = format!(
                "Failure in {}_reg: partition comparison for index {} - dimension mismatch",
                self.test_name, self.index
            );
            self.record_failure(msg);
            return false;
        }

        let mut forward = std::collections::HashMap::new();
        let mut backward = std::collections::HashMap::new();
        for (&a, &b) in l1.data().iter().zip(l2.data()) {
            let f = *forward.entry(a).or_insert(b);
            let r = *backward.entry(b).or_insert(a);
            if f != b || r != a {
                let msg = format!(
                    "Failure in {}_reg: partition comparison for index {} - label {} vs {}",
                    self.test_name, self.index, a, b
                );
                self.record_failure(msg);
                return false;
            }
        }

        true
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all comparisons passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare_params(name: &str) -> RegParams {
        let mut rp = RegParams::new(name);
        rp.mode = RegTestMode::Compare;
        rp
    }

    #[test]
    fn test_mode_from_env() {
        let mode = RegTestMode::from_env();
        assert!(matches!(mode, RegTestMode::Compare | RegTestMode::Display));
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = compare_params("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = compare_params("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_partitions_ignores_numbering() {
        let mut rp = compare_params("test");
        let a = LabelField::from_data(3, 1, vec![1, 2, 2]).unwrap();
        let b = LabelField::from_data(3, 1, vec![7, 3, 3]).unwrap();
        let c = LabelField::from_data(3, 1, vec![7, 7, 3]).unwrap();
        assert!(rp.compare_partitions(&a, &b));
        assert!(!rp.compare_partitions(&a, &c));
    }
}
