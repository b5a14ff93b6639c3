//! Operating lines of the rectifying (ESOL) and stripping (SSOL) sections.

use crate::error::{ColumnError, ColumnResult};
use crate::point::Point;
use mt_core::Real;
use serde::{Deserialize, Serialize};

/// A straight operating line `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingLine {
    pub slope: Real,
    pub intercept: Real,
}

impl OperatingLine {
    pub const fn new(slope: Real, intercept: Real) -> Self {
        Self { slope, intercept }
    }

    /// Line through two points. Fails for vertical or degenerate pairs.
    pub fn through(a: Point, b: Point) -> ColumnResult<Self> {
        let dx = b.x - a.x;
        if dx == 0.0 || !dx.is_finite() {
            return Err(ColumnError::domain(format!(
                "cannot fit an operating line through ({}, {}) and ({}, {})",
                a.x, a.y, b.x, b.y
            )));
        }
        let slope = (b.y - a.y) / dx;
        Ok(Self {
            slope,
            intercept: a.y - slope * a.x,
        })
    }

    /// Rectifying-section line: `y = (R·x + xd) / (R + 1)`.
    ///
    /// Passes through `(xd, xd)` with intercept `xd / (R + 1)`.
    pub fn rectifying(reflux_ratio: Real, distillate: Real) -> ColumnResult<Self> {
        if !reflux_ratio.is_finite() || reflux_ratio <= 0.0 {
            return Err(ColumnError::domain(format!(
                "reflux ratio must be positive and finite, got {reflux_ratio}"
            )));
        }
        Ok(Self {
            slope: reflux_ratio / (reflux_ratio + 1.0),
            intercept: distillate / (reflux_ratio + 1.0),
        })
    }

    /// Stripping-section line through the ESOL/q-line intersection and the
    /// bottoms point `(xb, xb)`.
    pub fn stripping(feed_intersection: Point, bottoms: Real) -> ColumnResult<Self> {
        Self::through(Point::diagonal(bottoms), feed_intersection)
    }

    #[inline]
    pub fn eval(&self, x: Real) -> Real {
        self.slope * x + self.intercept
    }

    pub fn point_at(&self, x: Real) -> Point {
        Point::new(x, self.eval(x))
    }

    /// Crossing point with another line, or `None` when parallel.
    pub fn intersection(&self, other: &OperatingLine) -> Option<Point> {
        let ds = self.slope - other.slope;
        if ds == 0.0 {
            return None;
        }
        let x = (other.intercept - self.intercept) / ds;
        let p = self.point_at(x);
        p.is_finite().then_some(p)
    }
}
