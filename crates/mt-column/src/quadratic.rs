//! Branch-selected roots of the quadratics that appear in the construction.
//!
//! Every quadratic here has one physically meaningful root, and which branch
//! of the quadratic formula produces it is known from the physics. Callers name
//! the branch explicitly; nothing here "picks whichever root looks right".

use crate::error::{ColumnError, ColumnResult};
use mt_core::Real;

/// Relative slack for discriminants that dip below zero through rounding
/// (tangent configurations).
const DISCRIMINANT_SLACK: Real = 1e-12;

/// Which sign of the square root in `(-b ± sqrt(b² - 4ac)) / 2a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootBranch {
    /// `(-b - sqrt(disc)) / 2a`
    Minus,
    /// `(-b + sqrt(disc)) / 2a`
    Plus,
}

/// Evaluate the requested branch of `a·x² + b·x + c = 0`.
///
/// Whenever the textbook form would subtract nearly equal numbers, the
/// algebraically identical `2c / (-b ∓ sqrt(disc))` is used for the same root.
/// That form also stays finite when `a` vanishes, provided the selected root is
/// the one that survives as the equation degenerates to linear.
pub fn select_root(a: Real, b: Real, c: Real, branch: RootBranch, what: &str) -> ColumnResult<Real> {
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return Err(ColumnError::domain(format!(
            "non-finite quadratic coefficients for {what} (a={a}, b={b}, c={c})"
        )));
    }

    let mut disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        if disc >= -DISCRIMINANT_SLACK * b * b {
            disc = 0.0;
        } else {
            return Err(ColumnError::domain(format!(
                "negative discriminant for {what}: {disc:e}"
            )));
        }
    }
    let s = disc.sqrt();

    let (num, den) = match branch {
        RootBranch::Minus if b >= 0.0 => (-b - s, 2.0 * a),
        RootBranch::Minus => (2.0 * c, -b + s),
        RootBranch::Plus if b < 0.0 => (-b + s, 2.0 * a),
        RootBranch::Plus => (2.0 * c, -b - s),
    };

    if den == 0.0 {
        return Err(ColumnError::domain(format!(
            "degenerate quadratic for {what}: selected root is unbounded"
        )));
    }

    let root = num / den;
    if root.is_finite() {
        Ok(root)
    } else {
        Err(ColumnError::domain(format!(
            "non-finite root for {what}: {root}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_branches_of_simple_quadratic() {
        // (x - 1)(x - 3) = x² - 4x + 3
        let lo = select_root(1.0, -4.0, 3.0, RootBranch::Minus, "t").unwrap();
        let hi = select_root(1.0, -4.0, 3.0, RootBranch::Plus, "t").unwrap();
        assert!((lo - 1.0).abs() < 1e-12);
        assert!((hi - 3.0).abs() < 1e-12);
    }

    #[test]
    fn branch_is_sign_of_root_not_magnitude() {
        // -(x - 2)(x + 1) = -x² + x + 2; a < 0 flips which branch is larger
        let minus = select_root(-1.0, 1.0, 2.0, RootBranch::Minus, "t").unwrap();
        let plus = select_root(-1.0, 1.0, 2.0, RootBranch::Plus, "t").unwrap();
        assert!((minus - 2.0).abs() < 1e-12);
        assert!((plus + 1.0).abs() < 1e-12);
    }

    #[test]
    fn linear_limit_is_finite() {
        // a = 0: -2x + 1 = 0 -> x = 0.5 on the Minus branch when b < 0
        let x = select_root(0.0, -2.0, 1.0, RootBranch::Minus, "t").unwrap();
        assert!((x - 0.5).abs() < 1e-15);
    }

    #[test]
    fn unbounded_root_is_rejected() {
        // a = 0, b > 0: the Minus branch root runs off to infinity
        let err = select_root(0.0, 2.0, 1.0, RootBranch::Minus, "t").unwrap_err();
        assert!(matches!(err, ColumnError::Domain { .. }));
    }

    #[test]
    fn negative_discriminant_is_domain_error() {
        let err = select_root(1.0, 0.0, 1.0, RootBranch::Minus, "unit circle").unwrap_err();
        assert!(err.to_string().contains("negative discriminant"));
    }

    #[test]
    fn tangent_root_survives_rounding() {
        // (x - 0.1)² with coefficients that round
        let a = 1.0;
        let b = -0.2;
        let c = 0.1 * 0.1;
        let x = select_root(a, b, c, RootBranch::Minus, "t").unwrap();
        assert!((x - 0.1).abs() < 1e-7);
    }

    #[test]
    fn small_leading_coefficient_keeps_precision() {
        // Roots near 1/|b| and -b/a; textbook form would cancel catastrophically.
        let a = -1e-12;
        let b = -1.0;
        let c = 0.5;
        let x = select_root(a, b, c, RootBranch::Minus, "t").unwrap();
        assert!((x - 0.5).abs() < 1e-9);
    }
}
