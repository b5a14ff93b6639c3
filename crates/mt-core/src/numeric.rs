use crate::MtError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, MtError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(MtError::NonFinite { what, value: v })
    }
}

/// Check that a mole fraction is finite and inside the closed unit interval.
pub fn ensure_fraction(v: Real, what: &'static str) -> Result<Real, MtError> {
    let v = ensure_finite(v, what)?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(MtError::OutOfRange {
            what,
            value: v,
            min: 0.0,
            max: 1.0,
        })
    }
}

/// `n` evenly spaced samples from `start` to `end`, both included.
pub fn linspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (end - start) / (n - 1) as Real;
            let mut points: Vec<Real> = (0..n).map(|i| start + i as Real * delta).collect();
            // Ensure exact endpoint
            points[n - 1] = end;
            points
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_fraction_bounds() {
        assert_eq!(ensure_fraction(0.0, "x").unwrap(), 0.0);
        assert_eq!(ensure_fraction(1.0, "x").unwrap(), 1.0);
        assert!(matches!(
            ensure_fraction(1.2, "x"),
            Err(MtError::OutOfRange { what: "x", .. })
        ));
        assert!(matches!(
            ensure_fraction(Real::INFINITY, "x"),
            Err(MtError::NonFinite { .. })
        ));
    }

    #[test]
    fn linspace_hits_both_ends() {
        let pts = linspace(0.0, 1.0, 100);
        assert_eq!(pts.len(), 100);
        assert_eq!(pts[0], 0.0);
        assert_eq!(pts[99], 1.0);
        assert!(pts.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(linspace(0.3, 0.7, 1), vec![0.3]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
