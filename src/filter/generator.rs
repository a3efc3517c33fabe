//! IIR filter design from an analog lowpass prototype.
//!
//! 1. place the prototype poles on the S-plane (Butterworth, optionally
//!    warped into a Chebyshev ellipse)
//! 2. pre-warp the cutoffs and transform the prototype into the requested
//!    lowpass / highpass / bandpass / bandstop shape
//! 3. map poles and zeroes to the Z-plane (bilinear or matched Z-transform)
//! 4. expand the roots into polynomials and normalize them by the leading
//!    denominator coefficient
//! 5. measure the passband gain used to scale the filter input

use std::f64::consts::PI;

use super::{
    ComplexCoefficients, Filter, FilterCoefficients, FilterMethod, FilterSettings, FilterType,
    TransformType,
};
use crate::complex::{Complex, complex_math};
use crate::error::{FilterError, Result};

/// Largest imaginary residue tolerated in an expanded polynomial coefficient
const IMAGINARY_RESIDUE_LIMIT: f64 = 1e-9;

/// Design coefficients when needed and build a filter on top of them
///
/// Coefficients already present in `settings` are reused. A failed design is
/// logged and still yields a filter; it runs on empty coefficients and
/// outputs zeros.
pub fn create_filter(settings: &mut FilterSettings, transform: TransformType) -> Filter<'_> {
    if !settings.coefficients.is_initialized()
        && let Err(e) = compute_coefficients(settings, transform)
    {
        log::warn!("Filter design failed: {}", e);
    }

    Filter::new(settings)
}

/// Compute normal-form coefficients for `settings`
///
/// The result is stored in `settings.coefficients` and the normalizing gain
/// in `settings.gain`.
///
/// # Errors
/// `FilterError::NotImplemented` for every method other than Butterworth;
/// `FilterError::Config` for degenerate settings. `settings` is left
/// untouched in both cases.
pub fn compute_coefficients(
    settings: &mut FilterSettings,
    transform: TransformType,
) -> Result<&FilterCoefficients> {
    match settings.filter_method {
        FilterMethod::Butterworth => compute_coefficients_iir(settings, transform),

        FilterMethod::Bessel
        | FilterMethod::Chebyshev
        | FilterMethod::ChebyshevII
        | FilterMethod::Elliptic
        | FilterMethod::Hann
        | FilterMethod::Hamming
        | FilterMethod::Blackman
        | FilterMethod::Sinc => {
            log::info!(
                "Filter {} is not implemented yet",
                settings.filter_method.name()
            );
            Err(FilterError::NotImplemented(settings.filter_method))
        }
    }
}

/// IIR design for the Butterworth family (Butterworth, Chebyshev I and II)
///
/// Only `Automatic` with Chebyshev I selects the matched Z-transform; every
/// other combination, an explicit `MatchedZTransform` request included, uses
/// the bilinear transform.
///
/// # Errors
/// `FilterError::Config` for a zero order, a non-positive sample rate or a
/// non-negative Chebyshev ripple; `FilterError::NotImplemented` for methods
/// without a prototype.
pub fn compute_coefficients_iir(
    settings: &mut FilterSettings,
    transform: TransformType,
) -> Result<&FilterCoefficients> {
    log::debug!("Computing coefficients for IIR Filter with following settings:");
    settings.log();

    if settings.filter_order == 0 {
        return Err(FilterError::Config("filter order must be at least 1".into()));
    }
    if !(settings.sample_rate > 0.0) {
        return Err(FilterError::Config(format!(
            "sample rate must be positive, got {}",
            settings.sample_rate
        )));
    }

    let transform = select_transform(settings.filter_method, transform);
    log::debug!("note: using {}", transform.name());

    let max_pn = 2 * settings.filter_order as usize;
    let mut s_plane = ComplexCoefficients::new(max_pn);

    // Step 1: prototype poles on the S-plane
    compute_prototype_lowpass(settings, &mut s_plane)?;
    log::debug!("Completed. S-Plane looks like this:");
    s_plane.log();

    // Step 2: normalized angular cutoffs, pre-warped for the bilinear transform
    let alpha1 = settings.low_cut_frequency / settings.sample_rate;
    let alpha2 = settings.high_cut_frequency / settings.sample_rate;
    let (w1, w2) = match transform {
        TransformType::BilinearTransform => {
            ((PI * alpha1).tan() * 2.0, (PI * alpha2).tan() * 2.0)
        }
        _ => (alpha1 * 2.0 * PI, alpha2 * 2.0 * PI),
    };
    log::debug!("Warped Alpha 1 = {:.15}", w1 / 2.0 / PI);
    log::debug!("Warped Alpha 2 = {:.15}", w2 / 2.0 / PI);

    // Step 3: lowpass prototype to the requested filter type
    log::debug!("Step 3: Transforming lowpass prototype to required filter");
    transform_prototype_lowpass(settings.filter_type, &mut s_plane, w1, w2);
    log::debug!("Completed. S-Plane looks like this:");
    s_plane.log();
    s_plane.shrink();

    // Step 4: S-plane to Z-plane
    log::debug!("Step 4: Transforming from S-Plane to Z-Plane");
    let mut z_plane = map_to_z_plane(&s_plane, max_pn, transform);
    log::debug!("Completed. Z-Plane values are:");
    z_plane.log();
    z_plane.shrink();

    // Chebyshev II is the inverse of the Type I design
    if settings.filter_method == FilterMethod::ChebyshevII {
        for pole in z_plane.poles.iter_mut() {
            *pole = 1.0 / *pole;
        }
        for zero in z_plane.zeroes.iter_mut() {
            *zero = 1.0 / *zero;
        }
    }

    // Step 5: roots to polynomial coefficients
    let top_coeffs = expand_poly(z_plane.active_zeroes());
    let bot_coeffs = expand_poly(z_plane.active_poles());

    let gain_dc = evaluate_response(&top_coeffs, &bot_coeffs, Complex::from_real(1.0));
    let gain_hf = evaluate_response(&top_coeffs, &bot_coeffs, Complex::from_real(-1.0));
    let theta = PI * (alpha1 + alpha2);
    let gain_fc = evaluate_response(&top_coeffs, &bot_coeffs, complex_math::exp_j(theta));

    let num_zeroes = z_plane.num_zeroes;
    let num_poles = z_plane.num_poles;
    let zeroes = top_coeffs[..=num_zeroes]
        .iter()
        .map(|c| c.real / bot_coeffs[num_zeroes].real)
        .collect();
    let poles = bot_coeffs[..=num_poles]
        .iter()
        .map(|c| c.real / bot_coeffs[num_poles].real)
        .collect();
    settings.coefficients = FilterCoefficients::from_parts(zeroes, poles);

    settings.gain = match settings.filter_type {
        FilterType::Lowpass => gain_dc.norm(),
        FilterType::Highpass => gain_hf.norm(),
        FilterType::Bandpass => gain_fc.norm(),
        FilterType::Bandstop => complex_math::sqrt(gain_dc * gain_hf).norm(),
    };
    log::debug!("Gain = {:.6}", settings.gain);

    log::debug!("done. Filter Coefficients are:");
    settings.coefficients.log();

    Ok(&settings.coefficients)
}

/// Resolve the transform actually used for `method`
pub fn select_transform(method: FilterMethod, requested: TransformType) -> TransformType {
    if requested == TransformType::Automatic && method == FilterMethod::Chebyshev {
        TransformType::MatchedZTransform
    } else {
        TransformType::BilinearTransform
    }
}

/// Place the analog lowpass prototype poles for `settings.filter_order`
///
/// Butterworth poles sit on the left half of the unit circle; Chebyshev
/// designs squeeze them onto an ellipse set by the passband ripple.
pub(crate) fn compute_prototype_lowpass(
    settings: &FilterSettings,
    s_plane: &mut ComplexCoefficients,
) -> Result<()> {
    let method = settings.filter_method;
    let order = settings.filter_order;

    match method {
        FilterMethod::Butterworth | FilterMethod::Chebyshev | FilterMethod::ChebyshevII => {}
        _ => return Err(FilterError::NotImplemented(method)),
    }

    log::debug!("Placing {} poles (Butterworth)", order);
    for i in 0..2 * order {
        let theta = if order % 2 == 1 {
            (i as f64 * PI) / order as f64
        } else {
            ((i as f64 + 0.5) * PI) / order as f64
        };

        let pole = complex_math::exp_j(theta);

        // left half-plane only
        if pole.real < 0.0 {
            s_plane.push_pole(pole);

            let pole_dist = pole.norm();
            if pole_dist > 1.0 {
                log::warn!(
                    "pole is located outside of unit circle ({:.15} from center)",
                    pole_dist
                );
            }
        }
    }

    if method.is_chebyshev() {
        log::debug!("Modifying Poles to get a Chebyshev Type 1 Filter");
        if !(settings.chebyshev_ripple < 0.0) {
            return Err(FilterError::Config(format!(
                "Chebyshev ripple must be negative, got {} dB",
                settings.chebyshev_ripple
            )));
        }

        let rip = 10f64.powf(-settings.chebyshev_ripple / 10.0);
        let eps = (rip - 1.0).sqrt();
        let y = (1.0 / eps).asinh() / order as f64;
        if !(y > 0.0) {
            return Err(FilterError::Config(format!(
                "Chebyshev ripple {} dB gives no pole warp",
                settings.chebyshev_ripple
            )));
        }

        let (sinh_y, cosh_y) = (y.sinh(), y.cosh());
        for pole in &mut s_plane.poles[..s_plane.num_poles] {
            pole.real *= sinh_y;
            pole.imag *= cosh_y;
        }
    }

    Ok(())
}

/// Turn the lowpass prototype into `filter_type` at angular cutoffs `w1`, `w2`
pub(crate) fn transform_prototype_lowpass(
    filter_type: FilterType,
    s_plane: &mut ComplexCoefficients,
    w1: f64,
    w2: f64,
) {
    match filter_type {
        FilterType::Lowpass => {
            for pole in &mut s_plane.poles[..s_plane.num_poles] {
                *pole *= w1;
            }
            s_plane.num_zeroes = 0;
        }

        FilterType::Highpass => {
            for pole in &mut s_plane.poles[..s_plane.num_poles] {
                *pole = w1 / *pole;
            }

            // one zero at the origin per pole
            s_plane.num_zeroes = 0;
            for _ in 0..s_plane.num_poles {
                s_plane.push_zero(Complex::default());
            }
        }

        FilterType::Bandpass => {
            let n = s_plane.num_poles;
            let w0 = (w1 * w2).sqrt();
            let bw = w2 - w1;

            // each prototype pole becomes a pair
            for i in 0..n {
                let hba = 0.5 * (s_plane.poles[i] * bw);
                let (upper, lower) = split_pole(hba, w0);
                s_plane.poles[i] = upper;
                s_plane.poles[n + i] = lower;
            }
            s_plane.num_poles = 2 * n;

            s_plane.num_zeroes = 0;
            for _ in 0..n {
                s_plane.push_zero(Complex::default());
            }
        }

        FilterType::Bandstop => {
            let n = s_plane.num_poles;
            let w0 = (w1 * w2).sqrt();
            let bw = w2 - w1;

            for i in 0..n {
                let hba = 0.5 * (bw / s_plane.poles[i]);
                let (upper, lower) = split_pole(hba, w0);
                s_plane.poles[i] = upper;
                s_plane.poles[n + i] = lower;
            }
            s_plane.num_poles = 2 * n;

            // zeroes on the imaginary axis at +-w0
            for i in 0..n {
                s_plane.zeroes[i] = Complex::new(0.0, w0);
                s_plane.zeroes[n + i] = Complex::new(0.0, -w0);
            }
            s_plane.num_zeroes = 2 * n;
        }
    }
}

/// `hba * (1 +- sqrt(1 - (w0 / hba)^2))`
fn split_pole(hba: Complex, w0: f64) -> (Complex, Complex) {
    let temp = complex_math::sqrt(1.0 - complex_math::pow(Complex::from_real(w0) / hba, 2));
    (hba * (1.0 + temp), hba * (1.0 - temp))
}

/// Map the shrunk S-plane roots into a fresh Z-plane staging area
fn map_to_z_plane(
    s_plane: &ComplexCoefficients,
    max_pn: usize,
    transform: TransformType,
) -> ComplexCoefficients {
    let mut z_plane = ComplexCoefficients::new(max_pn);

    let map: fn(Complex) -> Complex = match transform {
        TransformType::BilinearTransform => bilinear_transform,
        _ => complex_math::exp,
    };
    for &pole in s_plane.active_poles() {
        z_plane.push_pole(map(pole));
    }
    for &zero in s_plane.active_zeroes() {
        z_plane.push_zero(map(zero));
    }

    // the bilinear transform puts the missing zeroes at Nyquist
    if transform == TransformType::BilinearTransform {
        while z_plane.num_zeroes < z_plane.num_poles {
            z_plane.push_zero(Complex::from_real(-1.0));
        }
    }

    z_plane
}

/// `(2 + s) / (2 - s)`
pub fn bilinear_transform(s: Complex) -> Complex {
    (2.0 + s) / (2.0 - s)
}

/// Multiply out `(z - r0)(z - r1)...` into coefficients, lowest degree first
///
/// Conjugate-symmetric roots give real coefficients; a larger imaginary
/// residue is logged but kept.
pub fn expand_poly(roots: &[Complex]) -> Vec<Complex> {
    let n = roots.len();
    let mut coeffs = vec![Complex::default(); n + 1];
    coeffs[0] = Complex::from_real(1.0);

    for &root in roots {
        let nw = -1.0 * root;
        for c in (1..=n).rev() {
            coeffs[c] = (nw * coeffs[c]) + coeffs[c - 1];
        }
        coeffs[0] = nw * coeffs[0];
    }

    for c in &coeffs {
        if c.imag.abs() > IMAGINARY_RESIDUE_LIMIT {
            log::warn!(
                "Error while calculating normal form coefficients (poles/zeroes are not conjugate complex ({:.20})!)",
                c.imag
            );
        }
    }

    coeffs
}

/// Horner evaluation of `coeffs` (lowest degree first) at `z`
pub fn evaluate_poly(coeffs: &[Complex], z: Complex) -> Complex {
    coeffs
        .iter()
        .rev()
        .fold(Complex::default(), |acc, &c| acc * z + c)
}

/// `top(z) / bot(z)`
pub fn evaluate_response(top: &[Complex], bot: &[Complex], z: Complex) -> Complex {
    evaluate_poly(top, z) / evaluate_poly(bot, z)
}
