//! Feed-line (q-line) geometry and its intersections with the equilibrium
//! curve and the rectifying operating line.

use crate::equilibrium::EquilibriumModel;
use crate::error::{ColumnError, ColumnResult};
use crate::operating::OperatingLine;
use crate::point::Point;
use crate::quadratic::{RootBranch, select_root};
use mt_core::Real;
use serde::{Deserialize, Serialize};

/// Shift applied to q = 0 or q = 1 under [`QLineTreatment::Nudged`].
///
/// Intersections computed with the nudge agree with the exact vertical and
/// horizontal treatment to within 1e-6 in both coordinates.
pub const Q_NUDGE: Real = 1e-8;

/// Slack when checking that an intersection lies on the unit square.
const UNIT_SLACK: Real = 1e-12;

/// How saturated feeds (q = 0, q = 1) are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QLineTreatment {
    /// Vertical and horizontal q-lines get their own closed forms.
    #[default]
    Exact,
    /// Move q by [`Q_NUDGE`] off the singular value and use the sloped form.
    Nudged,
}

/// The feed line through `(xf, xf)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QLine {
    /// Saturated-liquid feed (q = 1): `x = xf`.
    Vertical { feed: Real },
    /// Saturated-vapor feed (q = 0): `y = xf`.
    Horizontal { feed: Real },
    /// `y = q/(q-1)·x - xf/(q-1)`.
    Sloped { q: Real, feed: Real, line: OperatingLine },
}

impl QLine {
    pub fn new(q: Real, feed: Real, treatment: QLineTreatment) -> ColumnResult<Self> {
        if !q.is_finite() {
            return Err(ColumnError::domain(format!("feed quality q must be finite, got {q}")));
        }
        let q = match treatment {
            QLineTreatment::Exact if q == 1.0 => return Ok(QLine::Vertical { feed }),
            QLineTreatment::Exact if q == 0.0 => return Ok(QLine::Horizontal { feed }),
            QLineTreatment::Nudged if q == 1.0 => q - Q_NUDGE,
            QLineTreatment::Nudged if q == 0.0 => q + Q_NUDGE,
            _ => q,
        };
        Ok(QLine::Sloped {
            q,
            feed,
            line: OperatingLine::new(q / (q - 1.0), feed / (1.0 - q)),
        })
    }

    pub fn feed(&self) -> Real {
        match *self {
            QLine::Vertical { feed } | QLine::Horizontal { feed } | QLine::Sloped { feed, .. } => {
                feed
            }
        }
    }

    /// Effective q after any nudge.
    pub fn q(&self) -> Real {
        match *self {
            QLine::Vertical { .. } => 1.0,
            QLine::Horizontal { .. } => 0.0,
            QLine::Sloped { q, .. } => q,
        }
    }

    pub fn feed_point(&self) -> Point {
        Point::diagonal(self.feed())
    }
}

/// Where the q-line meets the efficiency-corrected equilibrium curve.
///
/// For a sloped q-line `y = m·x + k` the crossing solves `a·x² + b·x + c = 0`:
///
/// ```text
/// a = αm - α + αη - m + 1 - η
/// b = m - 1 + η + αk - k - αη
/// c = k
/// ```
///
/// For q > 1 (subcooled liquid) the line is steeper than the diagonal,
/// `a > 0 > c`, and the composition is the `+sqrt` root. Otherwise the
/// `-sqrt` root is taken.
pub fn q_line_equilibrium_intersection(
    q_line: &QLine,
    equilibrium: &EquilibriumModel,
) -> ColumnResult<Point> {
    let x = match *q_line {
        QLine::Vertical { feed } => feed,
        QLine::Horizontal { feed } => equilibrium.liquid(feed)?,
        QLine::Sloped { q, line, .. } => {
            let al = equilibrium.alpha;
            let eta = equilibrium.efficiency;
            let m = line.slope;
            let k = line.intercept;
            let a = al * m - al + al * eta - m + 1.0 - eta;
            let b = m - 1.0 + eta + al * k - k - al * eta;
            let c = k;
            let branch = if q > 1.0 {
                RootBranch::Plus
            } else {
                RootBranch::Minus
            };
            select_root(a, b, c, branch, "q-line / equilibrium intersection")?
        }
    };

    if !(-UNIT_SLACK..=1.0 + UNIT_SLACK).contains(&x) {
        return Err(ColumnError::domain(format!(
            "q-line meets the equilibrium curve outside [0, 1] (x = {x})"
        )));
    }
    let y = match *q_line {
        QLine::Horizontal { feed } => feed,
        _ => equilibrium.vapor(x),
    };
    Ok(Point::new(x, y))
}

/// Minimum reflux and the ESOL intercept that produces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumReflux {
    /// ESOL y-intercept `θ_min` at minimum reflux.
    pub theta: Real,
    /// `R_min = xd / θ_min - 1`.
    pub ratio: Real,
}

impl MinimumReflux {
    /// The rectifying line at minimum reflux.
    pub fn line(&self, distillate: Real) -> OperatingLine {
        OperatingLine::new((distillate - self.theta) / distillate, self.theta)
    }
}

/// Minimum reflux from the line through `(xd, xd)` and the q-line /
/// equilibrium pinch.
pub fn minimum_reflux(distillate: Real, pinch: Point) -> ColumnResult<MinimumReflux> {
    if pinch.x >= distillate {
        return Err(ColumnError::domain(format!(
            "q-line meets the equilibrium curve at x = {} which is not below xd = {distillate}",
            pinch.x
        )));
    }
    let slope = (distillate - pinch.y) / (distillate - pinch.x);
    let theta = distillate * (1.0 - slope);
    if !theta.is_finite() || theta <= 0.0 {
        return Err(ColumnError::domain(format!(
            "minimum-reflux ESOL intercept is not positive (theta = {theta})"
        )));
    }
    let ratio = distillate / theta - 1.0;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(ColumnError::domain(format!(
            "minimum reflux ratio is not positive and finite (R_min = {ratio})"
        )));
    }
    Ok(MinimumReflux { theta, ratio })
}

/// Where the actual rectifying line crosses the q-line.
pub fn rectifying_q_intersection(q_line: &QLine, rectifying: &OperatingLine) -> ColumnResult<Point> {
    let p = match *q_line {
        QLine::Vertical { feed } => rectifying.point_at(feed),
        QLine::Horizontal { feed } => {
            Point::new((feed - rectifying.intercept) / rectifying.slope, feed)
        }
        QLine::Sloped { line, .. } => line.intersection(rectifying).ok_or_else(|| {
            ColumnError::domain("rectifying line is parallel to the q-line")
        })?,
    };
    if !p.is_finite() {
        return Err(ColumnError::domain("rectifying / q-line intersection is not finite"));
    }
    Ok(p)
}
