//! Vapor-liquid equilibrium at constant relative volatility.
//!
//! The ideal curve follows from Raoult's and Dalton's laws. Stage efficiency
//! is applied in the Murphree sense, as a fractional approach of the vapor
//! composition from `y = x` toward the ideal curve.

use crate::error::{ColumnError, ColumnResult};
use crate::point::Point;
use crate::quadratic::{RootBranch, select_root};
use mt_core::{Real, linspace};

/// Ideal equilibrium vapor composition: `y = αx / (1 + (α - 1)x)`.
pub fn equilibrium(x: Real, alpha: Real) -> Real {
    (alpha * x) / (1.0 + (alpha - 1.0) * x)
}

/// Equilibrium vapor composition after Murphree efficiency `eta`.
///
/// `eta = 1` reproduces [`equilibrium`]; `eta = 0` collapses to `y = x`.
pub fn equilibrium_with_efficiency(x: Real, alpha: Real, eta: Real) -> Real {
    let y = equilibrium(x, alpha);
    x + eta * (y - x)
}

/// Liquid composition in equilibrium with vapor `y` on the efficiency-corrected
/// curve. Inverse of [`equilibrium_with_efficiency`].
///
/// Clearing the denominator gives `a·x² + b·x + c = 0` with
///
/// ```text
/// a = αη - η - α + 1
/// b = yα - y + η - 1 - αη
/// c = y
/// ```
///
/// For α > 1 and η in (0, 1] we have `a ≤ 0 < c`, so the roots straddle zero
/// and the composition is always the `(-b - sqrt(disc)) / 2a` root.
pub fn inverse_equilibrium_with_efficiency(y: Real, alpha: Real, eta: Real) -> ColumnResult<Real> {
    let a = alpha * eta - eta - alpha + 1.0;
    let b = y * alpha - y + eta - 1.0 - alpha * eta;
    let c = y;
    select_root(a, b, c, RootBranch::Minus, "inverse equilibrium")
}

/// Relative volatility and stage efficiency, bundled so callers do not have
/// to thread both through every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumModel {
    pub alpha: Real,
    pub efficiency: Real,
}

impl EquilibriumModel {
    pub fn new(alpha: Real, efficiency: Real) -> ColumnResult<Self> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(ColumnError::domain(format!(
                "relative volatility must be positive and finite, got {alpha}"
            )));
        }
        if !efficiency.is_finite() || efficiency <= 0.0 || efficiency > 1.0 {
            return Err(ColumnError::domain(format!(
                "Murphree efficiency must lie in (0, 1], got {efficiency}"
            )));
        }
        Ok(Self { alpha, efficiency })
    }

    /// Ideal vapor composition.
    pub fn ideal(&self, x: Real) -> Real {
        equilibrium(x, self.alpha)
    }

    /// Efficiency-corrected vapor composition.
    pub fn vapor(&self, x: Real) -> Real {
        equilibrium_with_efficiency(x, self.alpha, self.efficiency)
    }

    /// Efficiency-corrected liquid composition for a given vapor.
    pub fn liquid(&self, y: Real) -> ColumnResult<Real> {
        inverse_equilibrium_with_efficiency(y, self.alpha, self.efficiency)
    }

    /// Sample the ideal and corrected curves at `n` evenly spaced liquid
    /// compositions on [0, 1].
    pub fn curve(&self, n: usize) -> (Vec<Point>, Vec<Point>) {
        linspace(0.0, 1.0, n)
            .into_iter()
            .map(|x| (Point::new(x, self.ideal(x)), Point::new(x, self.vapor(x))))
            .unzip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHA: Real = 179.2 / 74.3;

    #[test]
    fn ideal_curve_endpoints() {
        assert_eq!(equilibrium(0.0, ALPHA), 0.0);
        assert!((equilibrium(1.0, ALPHA) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn known_value() {
        // alpha = 2, x = 0.5 -> y = 1 / 1.5
        assert!((equilibrium(0.5, 2.0) - 2.0 / 3.0).abs() < 1e-15);
        // halfway there at eta = 0.5
        let y = equilibrium_with_efficiency(0.5, 2.0, 0.5);
        assert!((y - (0.5 + 0.5 * (2.0 / 3.0 - 0.5))).abs() < 1e-15);
    }

    #[test]
    fn full_efficiency_is_ideal() {
        for i in 0..=20 {
            let x = i as Real / 20.0;
            assert_eq!(equilibrium_with_efficiency(x, ALPHA, 1.0), equilibrium(x, ALPHA));
        }
    }

    #[test]
    fn vanishing_efficiency_is_diagonal() {
        for i in 0..=20 {
            let x = i as Real / 20.0;
            let y = equilibrium_with_efficiency(x, ALPHA, 1e-12);
            assert!((y - x).abs() < 1e-12);
        }
    }

    #[test]
    fn inverse_at_full_efficiency_has_closed_form() {
        // a = 0 when eta = 1; x = y / (α - (α - 1) y)
        for y in [0.05, 0.3, 0.6, 0.975] {
            let x = inverse_equilibrium_with_efficiency(y, ALPHA, 1.0).unwrap();
            let expected = y / (ALPHA - (ALPHA - 1.0) * y);
            assert!((x - expected).abs() < 1e-14, "y={y}: {x} vs {expected}");
        }
    }

    #[test]
    fn inverse_stays_in_unit_interval() {
        let model = EquilibriumModel::new(ALPHA, 0.75).unwrap();
        for i in 1..100 {
            let y = i as Real / 100.0;
            let x = model.liquid(y).unwrap();
            assert!(x > 0.0 && x < y, "y={y} gave x={x}");
        }
    }

    #[test]
    fn model_rejects_bad_parameters() {
        assert!(EquilibriumModel::new(0.0, 0.5).is_err());
        assert!(EquilibriumModel::new(-1.0, 0.5).is_err());
        assert!(EquilibriumModel::new(2.0, 0.0).is_err());
        assert!(EquilibriumModel::new(2.0, 1.01).is_err());
        assert!(EquilibriumModel::new(Real::NAN, 0.5).is_err());
        assert!(EquilibriumModel::new(2.0, 1.0).is_ok());
    }

    #[test]
    fn curve_samples_cover_unit_interval() {
        let model = EquilibriumModel::new(ALPHA, 0.75).unwrap();
        let (ideal, corrected) = model.curve(100);
        assert_eq!(ideal.len(), 100);
        assert_eq!(corrected.len(), 100);
        assert_eq!(ideal[0].x, 0.0);
        assert_eq!(ideal[99].x, 1.0);
        for (i, c) in ideal.iter().zip(&corrected) {
            assert!(c.y <= i.y + 1e-15);
            assert!(c.y >= c.x - 1e-15);
        }
    }
}
