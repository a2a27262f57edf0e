//! Polynomial root solvers for implicit surfaces.
//!
//! Quadratics use the cancellation-free form of the quadratic formula.
//! Quartics (torus) go through a Durand-Kerner iteration in f64, which finds
//! all four complex roots at once; real roots are the ones whose imaginary
//! part falls within a tolerance.

use num_complex::Complex64;

/// Solve `a*t^2 + b*t + c = 0`.
///
/// Returns both roots in ascending order, or `None` when the discriminant is
/// negative or `a` is zero.
pub fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    solve_quadratic_with_tolerance(a, b, c, 0.0)
}

/// Like [`solve_quadratic`], but discriminants in `[-tolerance, 0)` are
/// treated as zero (a tangent hit) instead of a miss.
pub fn solve_quadratic_with_tolerance(
    a: f32,
    b: f32,
    c: f32,
    tolerance: f32,
) -> Option<(f32, f32)> {
    if a == 0.0 || !a.is_finite() {
        return None;
    }

    let mut discriminant = b * b - 4.0 * a * c;
    if discriminant < -tolerance {
        return None;
    }
    discriminant = discriminant.max(0.0);

    // q carries the sign of b so the two terms never cancel
    let sign = if b >= 0.0 { 1.0 } else { -1.0 };
    let q = -0.5 * (b + sign * discriminant.sqrt());

    let (t0, t1) = if q == 0.0 {
        // b == 0 and c == 0: double root at zero
        (0.0, 0.0)
    } else {
        (q / a, c / q)
    };

    Some(if t0 <= t1 { (t0, t1) } else { (t1, t0) })
}

/// Tuning for [`solve_quartic`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarticOptions {
    /// Largest imaginary part a root may have and still count as real.
    pub imag_tolerance: f64,
    /// Iteration cap for the simultaneous root iteration.
    pub max_iterations: usize,
    /// Relative step size below which the iteration is considered converged.
    pub convergence: f64,
}

impl Default for QuarticOptions {
    fn default() -> Self {
        Self {
            imag_tolerance: 1e-6,
            max_iterations: 500,
            convergence: 1e-14,
        }
    }
}

/// Real roots of `c[0]*t^4 + c[1]*t^3 + c[2]*t^2 + c[3]*t + c[4] = 0`,
/// sorted ascending.
///
/// A (near) zero leading coefficient yields no roots.
pub fn solve_quartic(coeffs: [f64; 5], options: &QuarticOptions) -> Vec<f64> {
    let lead = coeffs[0];
    if lead.abs() < f64::EPSILON || coeffs.iter().any(|c| !c.is_finite()) {
        return Vec::new();
    }

    let monic = [
        1.0,
        coeffs[1] / lead,
        coeffs[2] / lead,
        coeffs[3] / lead,
        coeffs[4] / lead,
    ];

    // Fujiwara bound on root magnitude, used as the radius of the start circle
    let radius = (1..5)
        .map(|i| monic[i].abs().powf(1.0 / i as f64))
        .fold(0.0_f64, f64::max)
        .max(1e-3)
        * 2.0;

    let mut z: [Complex64; 4] = std::array::from_fn(|k| {
        Complex64::from_polar(radius, std::f64::consts::FRAC_PI_2 * k as f64 + 0.4)
    });

    for _ in 0..options.max_iterations {
        let mut max_step = 0.0_f64;

        for i in 0..4 {
            let mut denom = Complex64::new(1.0, 0.0);
            for j in 0..4 {
                if i != j {
                    denom *= z[i] - z[j];
                }
            }
            if denom.norm() == 0.0 {
                // Coincident estimates; nudge apart and keep iterating
                denom = Complex64::new(1e-12, 1e-12);
            }

            let step = eval_complex(&monic, z[i]) / denom;
            z[i] -= step;
            max_step = max_step.max(step.norm() / (1.0 + z[i].norm()));
        }

        if max_step < options.convergence {
            break;
        }
    }

    let mut roots: Vec<f64> = z
        .iter()
        .filter(|root| root.im.abs() <= options.imag_tolerance)
        .map(|root| polish(&monic, root.re))
        .collect();

    roots.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    roots
}

/// A few Newton steps on the real polynomial to tidy up a converged root.
fn polish(monic: &[f64; 5], mut t: f64) -> f64 {
    for _ in 0..3 {
        let (value, derivative) = eval_real(monic, t);
        if derivative.abs() < f64::EPSILON {
            break;
        }
        let next = t - value / derivative;
        if !next.is_finite() {
            break;
        }
        t = next;
    }
    t
}

/// Horner evaluation of the polynomial and its derivative at a real point.
fn eval_real(coeffs: &[f64; 5], t: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut derivative = 0.0;
    for &c in coeffs {
        derivative = derivative * t + value;
        value = value * t + c;
    }
    (value, derivative)
}

fn eval_complex(coeffs: &[f64; 5], z: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
}
