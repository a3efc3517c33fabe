use std::f64::consts::PI;

/// Unit impulse followed by `len - 1` zeros
pub fn impulse(len: usize) -> Vec<f64> {
    let mut samples = vec![0.0; len];
    if let Some(first) = samples.first_mut() {
        *first = 1.0;
    }
    samples
}

/// Sine tone of unit amplitude
pub fn sine(freq_hz: f64, sample_rate: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate).sin())
        .collect()
}

/// Root mean square of the samples after skipping the filter's settling time
pub fn rms_after(samples: &[f64], skip: usize) -> f64 {
    let tail = &samples[skip.min(samples.len())..];
    if tail.is_empty() {
        return 0.0;
    }
    (tail.iter().map(|x| x * x).sum::<f64>() / tail.len() as f64).sqrt()
}

/// Gain of `output` relative to `input` in dB
pub fn attenuation_db(input: &[f64], output: &[f64], skip: usize) -> f64 {
    20.0 * (rms_after(output, skip) / rms_after(input, skip)).log10()
}
