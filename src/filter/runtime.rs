use super::{FilterCoefficients, FilterSettings};
use crate::complex::Complex;

/// Output magnitude above which a filter is considered to have blown up
pub const UNSTABLE_OUTPUT_LIMIT: f64 = 1e7;

/// Direct-form IIR/FIR filter running designed coefficients
///
/// Borrows its settings; any number of filters (one per channel) may share
/// one `FilterSettings`. The input history is sized to the pole count and
/// the output history to the zero count. Each instance must only be driven
/// from one thread at a time.
pub struct Filter<'a> {
    settings: &'a FilterSettings,
    x_buffer: Vec<f64>,
    y_buffer: Vec<f64>,
}

impl<'a> Filter<'a> {
    pub fn new(settings: &'a FilterSettings) -> Self {
        let num_input_samples = settings.coefficients.num_poles();
        let num_output_samples = settings.coefficients.num_zeroes();

        Self {
            settings,
            x_buffer: vec![0.0; num_input_samples],
            y_buffer: vec![0.0; num_output_samples],
        }
    }

    pub fn settings(&self) -> &'a FilterSettings {
        self.settings
    }

    /// Input history, most recent sample first
    pub fn x_buffer(&self) -> &[f64] {
        &self.x_buffer
    }

    /// Output history, most recent sample first
    pub fn y_buffer(&self) -> &[f64] {
        &self.y_buffer
    }

    /// Filter one sample
    ///
    /// Never fails: unusable settings (no coefficients, zero gain) show up as
    /// zero or non-finite output.
    pub fn evaluate(&mut self, input: f64) -> f64 {
        shift(&mut self.x_buffer);
        shift(&mut self.y_buffer);

        evaluate_direct_form(
            input,
            &self.settings.coefficients,
            self.settings.gain,
            &mut self.x_buffer,
            &mut self.y_buffer,
        )
    }

    /// Filter a buffer of samples in-place
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.evaluate(*sample);
        }
    }

    /// Clear the sample history
    pub fn reset(&mut self) {
        self.x_buffer.fill(0.0);
        self.y_buffer.fill(0.0);
    }

    /// Transfer function `H(z)` of the underlying coefficients
    pub fn evaluate_transfer_function(&self, z: Complex) -> Complex {
        self.settings.coefficients.evaluate_transfer_function(z)
    }
}

/// Move every sample one slot towards the end, dropping the oldest.
fn shift(buffer: &mut [f64]) {
    if buffer.len() > 1 {
        let last = buffer.len() - 1;
        buffer.copy_within(0..last, 1);
    }
}

/// One step of the difference equation
///
/// `y(n) = zero(n)*x(n) + zero(n-1)*x(n-1) + ... - pole(n-1)*y(n-1) - ...`
///
/// `x[0]` receives `input / gain` and `y[0]` the result. History slots past
/// the end of a buffer read as zero.
pub fn evaluate_direct_form(
    input: f64,
    coeffs: &FilterCoefficients,
    gain: f64,
    x: &mut [f64],
    y: &mut [f64],
) -> f64 {
    if let Some(newest) = x.first_mut() {
        *newest = input / gain;
    }

    // feed-forward terms
    let num_zeroes = coeffs.num_zeroes();
    let sum_x: f64 = coeffs
        .zeroes()
        .iter()
        .enumerate()
        .map(|(i, zero)| zero * history(x, num_zeroes - 1 - i))
        .sum();

    // feed-back terms; the leading pole coefficient is the normalized 1 on
    // the left-hand side of the recurrence
    let num_poles = coeffs.num_poles();
    let feedback = &coeffs.poles()[..num_poles.saturating_sub(1)];
    let sum_y: f64 = feedback
        .iter()
        .enumerate()
        .map(|(i, pole)| pole * history(y, num_poles - 1 - i))
        .sum();

    let result = sum_x - sum_y;

    if let Some(newest) = y.first_mut() {
        *newest = result;
    }

    result
}

#[inline]
fn history(buffer: &[f64], index: usize) -> f64 {
    buffer.get(index).copied().unwrap_or(0.0)
}

/// Heuristic blow-up check on a single output sample
pub fn is_unstable_output(value: f64) -> bool {
    !value.is_finite() || value.abs() > UNSTABLE_OUTPUT_LIMIT
}

/// Chain of identical filters, `cascade_length` stages long
pub struct FilterCascade<'a> {
    stages: Vec<Filter<'a>>,
    last_output: f64,
}

impl<'a> FilterCascade<'a> {
    pub fn new(settings: &'a FilterSettings) -> Self {
        let length = settings.cascade_length.max(1) as usize;
        Self {
            stages: (0..length).map(|_| Filter::new(settings)).collect(),
            last_output: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run one sample through every stage in order
    pub fn evaluate(&mut self, input: f64) -> f64 {
        let output = self
            .stages
            .iter_mut()
            .fold(input, |sample, stage| stage.evaluate(sample));
        self.last_output = output;
        output
    }

    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.evaluate(*sample);
        }
    }

    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
        self.last_output = 0.0;
    }

    /// Whether the most recent output tripped the stability heuristic
    pub fn is_unstable(&self) -> bool {
        is_unstable_output(self.last_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn settings_with(zeroes: Vec<f64>, poles: Vec<f64>, gain: f64) -> FilterSettings {
        FilterSettings {
            sample_rate: 100.0,
            gain,
            coefficients: FilterCoefficients::from_parts(zeroes, poles),
            ..Default::default()
        }
    }

    #[test]
    fn test_buffers_sized_from_coefficients() {
        let settings = settings_with(vec![1.0, 2.0], vec![0.5, 0.2, 1.0], 1.0);
        let mut filter = Filter::new(&settings);
        assert_eq!(filter.x_buffer().len(), 3);
        assert_eq!(filter.y_buffer().len(), 2);

        for i in 0..50 {
            filter.evaluate(i as f64);
            assert_eq!(filter.x_buffer().len(), 3);
            assert_eq!(filter.y_buffer().len(), 2);
        }
    }

    #[test]
    fn test_one_pole_recursion() {
        // y(n) = x(n) + 0.5 y(n-1)
        let settings = settings_with(vec![0.0, 1.0], vec![-0.5, 1.0], 1.0);
        let mut filter = Filter::new(&settings);

        let expected = [1.0, 0.5, 0.25, 0.125];
        assert_abs_diff_eq!(filter.evaluate(1.0), expected[0]);
        for &e in &expected[1..] {
            assert_abs_diff_eq!(filter.evaluate(0.0), e);
        }
    }

    #[test]
    fn test_input_scaled_by_gain() {
        let settings = settings_with(vec![0.0, 1.0], vec![0.0, 1.0], 4.0);
        let mut filter = Filter::new(&settings);
        assert_abs_diff_eq!(filter.evaluate(2.0), 0.5);
        assert_abs_diff_eq!(filter.x_buffer()[0], 0.5);
    }

    #[test]
    fn test_moving_sum() {
        // y(n) = x(n) + x(n-1)
        let settings = settings_with(vec![1.0, 1.0], vec![0.0, 1.0], 1.0);
        let mut filter = Filter::new(&settings);
        let mut buffer = [1.0, 2.0, 3.0, 0.0];
        filter.process_buffer(&mut buffer);
        assert_eq!(buffer, [1.0, 3.0, 5.0, 3.0]);
    }

    #[test]
    fn test_uninitialized_coefficients_output_zero() {
        let settings = FilterSettings::default();
        let mut filter = Filter::new(&settings);
        assert!(filter.x_buffer().is_empty());
        assert_eq!(filter.evaluate(1.0), 0.0);
        assert_eq!(filter.evaluate(-3.0), 0.0);
    }

    #[test]
    fn test_reset_clears_history() {
        let settings = settings_with(vec![0.0, 1.0], vec![-0.5, 1.0], 1.0);
        let mut filter = Filter::new(&settings);
        filter.evaluate(1.0);
        filter.reset();
        assert!(filter.x_buffer().iter().all(|&v| v == 0.0));
        assert_abs_diff_eq!(filter.evaluate(0.0), 0.0);
    }

    #[test]
    fn test_shift() {
        let mut buffer = [1.0, 2.0, 3.0];
        shift(&mut buffer);
        assert_eq!(buffer, [1.0, 1.0, 2.0]);

        let mut empty: [f64; 0] = [];
        shift(&mut empty);
    }

    #[test]
    fn test_stability_heuristic() {
        assert!(!is_unstable_output(0.0));
        assert!(!is_unstable_output(-1e6));
        assert!(is_unstable_output(2e7));
        assert!(is_unstable_output(f64::NAN));
        assert!(is_unstable_output(f64::NEG_INFINITY));
    }

    #[test]
    fn test_cascade_chains_stages() {
        let mut settings = settings_with(vec![0.0, 1.0], vec![-0.5, 1.0], 1.0);
        settings.cascade_length = 2;
        let mut cascade = FilterCascade::new(&settings);
        assert_eq!(cascade.len(), 2);

        // impulse response of two chained one-pole filters: (n + 1) * 0.5^n
        assert_abs_diff_eq!(cascade.evaluate(1.0), 1.0);
        assert_abs_diff_eq!(cascade.evaluate(0.0), 1.0);
        assert_abs_diff_eq!(cascade.evaluate(0.0), 0.75);
        assert_abs_diff_eq!(cascade.evaluate(0.0), 0.5);
        assert!(!cascade.is_unstable());
    }

    #[test]
    fn test_cascade_flags_divergence() {
        let settings = settings_with(vec![0.0, 1.0], vec![-2.0, 1.0], 1.0);
        let mut cascade = FilterCascade::new(&settings);
        cascade.evaluate(1.0);
        for _ in 0..40 {
            cascade.evaluate(0.0);
        }
        assert!(cascade.is_unstable());
    }

    #[test]
    fn test_zero_cascade_length_runs_one_stage() {
        let mut settings = settings_with(vec![1.0], vec![1.0], 1.0);
        settings.cascade_length = 0;
        assert_eq!(FilterCascade::new(&settings).len(), 1);
    }
}
