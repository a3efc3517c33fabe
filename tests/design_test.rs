use approx::assert_abs_diff_eq;
use sigfilter::filter::generator::{compute_coefficients_iir, expand_poly};
use sigfilter::filter::response::magnitude_at;
use sigfilter::{
    Complex, FilterError, FilterMethod, FilterSettings, FilterType, TransformType,
    compute_coefficients,
};

fn settings(filter_type: FilterType, order: u32, low: f64, high: f64) -> FilterSettings {
    FilterSettings {
        sample_rate: 256.0,
        filter_type,
        filter_order: order,
        low_cut_frequency: low,
        high_cut_frequency: high,
        ..Default::default()
    }
}

#[test]
fn test_second_order_butterworth_lowpass() {
    let mut settings = settings(FilterType::Lowpass, 2, 10.0, 12.0);
    let coeffs = compute_coefficients(&mut settings, TransformType::Automatic)
        .expect("Butterworth design failed")
        .clone();

    // two prototype poles plus the leading coefficient; the bilinear
    // transform pads the zeroes up to the pole count
    assert_eq!(coeffs.num_poles(), 3);
    assert_eq!(coeffs.num_zeroes(), 3);
    assert_eq!(coeffs.poles()[2], 1.0);

    assert!(settings.gain.is_finite());
    assert!(settings.gain > 0.0);

    let dc = coeffs.evaluate_response(Complex::from_real(1.0)).norm();
    assert_abs_diff_eq!(settings.gain, dc, epsilon = 1e-9 * dc);
}

#[test]
fn test_leading_pole_coefficient_is_one() {
    for filter_type in [
        FilterType::Lowpass,
        FilterType::Highpass,
        FilterType::Bandpass,
        FilterType::Bandstop,
    ] {
        for order in 1..=6 {
            let mut settings = settings(filter_type, order, 8.0, 12.0);
            let coeffs = compute_coefficients(&mut settings, TransformType::Automatic).unwrap();
            let leading = coeffs.poles()[coeffs.num_poles() - 1];
            assert_eq!(leading, 1.0, "{} order {}", filter_type, order);
        }
    }
}

#[test]
fn test_coefficient_counts_per_type() {
    let order = 3;
    let expected = [
        (FilterType::Lowpass, 4, 4),
        (FilterType::Highpass, 4, 4),
        (FilterType::Bandpass, 7, 7),
        (FilterType::Bandstop, 7, 7),
    ];
    for (filter_type, poles, zeroes) in expected {
        let mut settings = settings(filter_type, order, 8.0, 12.0);
        let coeffs = compute_coefficients(&mut settings, TransformType::Automatic).unwrap();
        assert_eq!(coeffs.num_poles(), poles, "{}", filter_type);
        assert_eq!(coeffs.num_zeroes(), zeroes, "{}", filter_type);
    }
}

#[test]
fn test_design_is_deterministic() {
    let mut first = settings(FilterType::Bandpass, 4, 8.0, 12.0);
    let mut second = first.clone();

    compute_coefficients(&mut first, TransformType::Automatic).unwrap();
    compute_coefficients(&mut second, TransformType::Automatic).unwrap();
    assert_eq!(first.coefficients, second.coefficients);
    assert_eq!(first.gain.to_bits(), second.gain.to_bits());

    // redesign on the same settings after resetting
    let before = first.coefficients.clone();
    let gain = first.gain;
    first.reset_design();
    compute_coefficients(&mut first, TransformType::Automatic).unwrap();
    assert_eq!(first.coefficients, before);
    assert_eq!(first.gain.to_bits(), gain.to_bits());
}

#[test]
fn test_passband_normalization() {
    let mut lowpass = settings(FilterType::Lowpass, 4, 20.0, 40.0);
    compute_coefficients(&mut lowpass, TransformType::Automatic).unwrap();
    assert_abs_diff_eq!(magnitude_at(&lowpass, 0.0), 1.0, epsilon = 1e-9);

    let mut highpass = settings(FilterType::Highpass, 4, 20.0, 40.0);
    compute_coefficients(&mut highpass, TransformType::Automatic).unwrap();
    assert_abs_diff_eq!(magnitude_at(&highpass, 128.0), 1.0, epsilon = 1e-9);

    // the bandpass gain is measured at the arithmetic mean of the cutoffs
    let mut bandpass = settings(FilterType::Bandpass, 4, 20.0, 40.0);
    compute_coefficients(&mut bandpass, TransformType::Automatic).unwrap();
    assert_abs_diff_eq!(magnitude_at(&bandpass, 30.0), 1.0, epsilon = 1e-9);
    assert!(magnitude_at(&bandpass, 2.0) < 0.01);
    assert!(magnitude_at(&bandpass, 100.0) < 0.01);
}

#[test]
fn test_bandstop_notch() {
    let mut bandstop = settings(FilterType::Bandstop, 2, 48.0, 52.0);
    compute_coefficients(&mut bandstop, TransformType::Automatic).unwrap();

    // DC and Nyquist responses match, so the geometric-mean gain is unity at both
    assert_abs_diff_eq!(magnitude_at(&bandstop, 0.0), 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(magnitude_at(&bandstop, 128.0), 1.0, epsilon = 1e-6);

    // the zeroes at +-w0 land on the unit circle at the warped notch frequency
    let w1 = 2.0 * (std::f64::consts::PI * 48.0 / 256.0).tan();
    let w2 = 2.0 * (std::f64::consts::PI * 52.0 / 256.0).tan();
    let w0 = (w1 * w2).sqrt();
    let notch_hz = 256.0 * (w0 / 2.0).atan() / std::f64::consts::PI;
    assert!((notch_hz - 50.0).abs() < 0.5);
    assert!(magnitude_at(&bandstop, notch_hz) < 1e-6);
}

#[test]
fn test_explicit_matched_z_request_uses_bilinear() {
    let mut explicit = settings(FilterType::Lowpass, 3, 10.0, 12.0);
    let mut bilinear = explicit.clone();
    compute_coefficients(&mut explicit, TransformType::MatchedZTransform).unwrap();
    compute_coefficients(&mut bilinear, TransformType::BilinearTransform).unwrap();
    assert_eq!(explicit.coefficients, bilinear.coefficients);
}

#[test]
fn test_chebyshev_is_not_dispatched() {
    let mut settings = FilterSettings {
        filter_method: FilterMethod::Chebyshev,
        ..settings(FilterType::Lowpass, 3, 10.0, 12.0)
    };
    let result = compute_coefficients(&mut settings, TransformType::Automatic);
    assert!(matches!(
        result,
        Err(FilterError::NotImplemented(FilterMethod::Chebyshev))
    ));
    assert!(!settings.is_designed());
}

#[test]
fn test_chebyshev_automatic_uses_matched_z() {
    let mut settings = FilterSettings {
        filter_method: FilterMethod::Chebyshev,
        chebyshev_ripple: -1.0,
        ..settings(FilterType::Lowpass, 4, 10.0, 12.0)
    };
    let coeffs = compute_coefficients_iir(&mut settings, TransformType::Automatic)
        .unwrap()
        .clone();

    // matched Z adds no zeroes at Nyquist
    assert_eq!(coeffs.num_poles(), 5);
    assert_eq!(coeffs.num_zeroes(), 1);
    assert_eq!(coeffs.poles()[4], 1.0);
    assert!(settings.gain.is_finite() && settings.gain > 0.0);
}

#[test]
fn test_chebyshev_bilinear_lowpass() {
    let mut settings = FilterSettings {
        filter_method: FilterMethod::Chebyshev,
        chebyshev_ripple: -1.0,
        ..settings(FilterType::Lowpass, 4, 10.0, 12.0)
    };
    compute_coefficients_iir(&mut settings, TransformType::BilinearTransform).unwrap();

    assert_abs_diff_eq!(magnitude_at(&settings, 0.0), 1.0, epsilon = 1e-9);
    assert!(magnitude_at(&settings, 60.0) < 0.01);
}

#[test]
fn test_chebyshev_ii_inverts_type_i_roots() {
    let base = FilterSettings {
        chebyshev_ripple: -1.0,
        ..settings(FilterType::Lowpass, 3, 10.0, 12.0)
    };

    let mut type_one = FilterSettings {
        filter_method: FilterMethod::Chebyshev,
        ..base.clone()
    };
    compute_coefficients_iir(&mut type_one, TransformType::BilinearTransform).unwrap();

    let mut type_two = FilterSettings {
        filter_method: FilterMethod::ChebyshevII,
        ..base
    };
    compute_coefficients_iir(&mut type_two, TransformType::Automatic).unwrap();

    // reciprocal roots reverse the monic denominator
    let p1 = type_one.coefficients.poles();
    let p2 = type_two.coefficients.poles();
    let n = p1.len() - 1;
    for k in 0..=n {
        assert_abs_diff_eq!(p2[k], p1[n - k] / p1[0], epsilon = 1e-9);
    }
}

#[test]
fn test_order_zero_is_rejected() {
    let mut settings = settings(FilterType::Lowpass, 0, 10.0, 12.0);
    let result = compute_coefficients(&mut settings, TransformType::Automatic);
    assert!(matches!(result, Err(FilterError::Config(_))));
    assert!(!settings.is_designed());
}

#[test]
fn test_expand_poly_boundary() {
    assert_eq!(expand_poly(&[]), vec![Complex::from_real(1.0)]);
}
