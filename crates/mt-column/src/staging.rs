//! Staircase construction between the operating lines and the equilibrium
//! curve.
//!
//! The construction starts at `(xd, xd)` in the rectifying section. Each step
//! moves horizontally to the equilibrium curve, then vertically to the
//! operating line of the current section. The first step whose liquid
//! composition reaches the ESOL/q-line crossing switches to the stripping line
//! and marks the feed stage. The first stripping step at or below `xb` ends
//! the construction.

use crate::equilibrium::EquilibriumModel;
use crate::error::{ColumnError, ColumnResult};
use crate::operating::OperatingLine;
use crate::point::Point;
use mt_core::Real;
use serde::{Deserialize, Serialize};

/// Default safety cap on the number of stages.
pub const DEFAULT_MAX_STAGES: usize = 500;

/// Column section currently being stepped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Rectifying,
    Stripping,
    Done,
}

/// One equilibrium step: horizontal run `x1 -> x2` at `y1`, then vertical
/// rise to `y2` at `x2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StagePoint {
    pub x1: Real,
    pub y1: Real,
    pub x2: Real,
    pub y2: Real,
}

impl StagePoint {
    /// Point reached on the equilibrium curve.
    pub fn on_curve(&self) -> Point {
        Point::new(self.x2, self.y1)
    }

    /// Point reached on the operating line.
    pub fn on_line(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

/// Everything the step function needs, passed explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagingGeometry {
    pub equilibrium: EquilibriumModel,
    pub rectifying: OperatingLine,
    pub stripping: OperatingLine,
    /// x of the ESOL/q-line crossing.
    pub switch_x: Real,
    pub distillate: Real,
    pub bottoms: Real,
}

/// Output of a single application of [`step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// 1-based stage number.
    pub stage: usize,
    /// Section whose operating line closed this stage.
    pub section: Section,
    /// Section the next step starts in.
    pub next: Section,
    pub point: StagePoint,
}

/// Pure step function: `(section, point) -> (closing section, next section, stage)`.
pub fn step(
    section: Section,
    from: Point,
    geometry: &StagingGeometry,
) -> ColumnResult<(Section, Section, StagePoint)> {
    if section == Section::Done {
        return Err(ColumnError::domain("staircase is already complete"));
    }

    let x2 = geometry.equilibrium.liquid(from.y)?;
    let closing = match section {
        Section::Rectifying if x2 <= geometry.switch_x => Section::Stripping,
        s => s,
    };
    let y2 = match closing {
        Section::Rectifying => geometry.rectifying.eval(x2),
        _ => geometry.stripping.eval(x2),
    };
    if !(x2.is_finite() && y2.is_finite()) {
        return Err(ColumnError::domain(format!(
            "non-finite stage composition (x = {x2}, y = {y2})"
        )));
    }

    let next = if closing == Section::Stripping && x2 <= geometry.bottoms {
        Section::Done
    } else {
        closing
    };

    Ok((
        closing,
        next,
        StagePoint {
            x1: from.x,
            y1: from.y,
            x2,
            y2,
        },
    ))
}

impl StagingGeometry {
    /// Lazy stage sequence starting at `(xd, xd)`. Calling again restarts it.
    pub fn steps(&self, max_stages: usize) -> Steps<'_> {
        Steps {
            geometry: self,
            section: Section::Rectifying,
            point: Point::diagonal(self.distillate),
            stage: 0,
            max_stages,
            failed: false,
        }
    }
}

/// Iterator over the staircase. Yields at most `max_stages` steps. It yields
/// an error and then stops if the stages would exceed the cap or stepping
/// stalls.
#[derive(Debug, Clone)]
pub struct Steps<'a> {
    geometry: &'a StagingGeometry,
    section: Section,
    point: Point,
    stage: usize,
    max_stages: usize,
    failed: bool,
}

impl Iterator for Steps<'_> {
    type Item = ColumnResult<Step>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.section == Section::Done {
            return None;
        }
        if self.stage >= self.max_stages {
            self.failed = true;
            return Some(Err(ColumnError::NumericalDivergence {
                what: format!(
                    "staircase did not reach xb = {} within the stage cap (x = {})",
                    self.geometry.bottoms, self.point.x
                ),
                stages: self.stage,
            }));
        }

        let (section, next, point) = match step(self.section, self.point, self.geometry) {
            Ok(out) => out,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };
        if point.x2 >= point.x1 {
            self.failed = true;
            return Some(Err(ColumnError::NumericalDivergence {
                what: format!("stepping stalled at x = {}", point.x1),
                stages: self.stage,
            }));
        }

        self.stage += 1;
        self.section = next;
        self.point = point.on_line();
        tracing::debug!(
            stage = self.stage,
            ?section,
            x = point.x2,
            y = point.y2,
            "equilibrium stage"
        );

        Some(Ok(Step {
            stage: self.stage,
            section,
            next,
            point,
        }))
    }
}

/// A completed staircase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staircase {
    pub stages: Vec<StagePoint>,
    /// Stage at which stepping switched to the stripping line (1-based).
    pub feed_stage: usize,
    /// Liquid composition of the last stage, at or below the bottoms target.
    pub bottoms_actual: Real,
}

impl Staircase {
    /// Total number of equilibrium stages, the last one included.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Stages stepped on the rectifying line, feed stage excluded.
    pub fn rectifying_stages(&self) -> usize {
        self.feed_stage.saturating_sub(1)
    }
}

/// Run the construction to completion.
pub fn construct_staircase(geometry: &StagingGeometry, max_stages: usize) -> ColumnResult<Staircase> {
    let mut stages = Vec::new();
    let mut feed_stage = None;

    for step in geometry.steps(max_stages) {
        let step = step?;
        if feed_stage.is_none() && step.section == Section::Stripping {
            feed_stage = Some(step.stage);
        }
        stages.push(step.point);
    }

    let (Some(feed_stage), Some(last)) = (feed_stage, stages.last()) else {
        return Err(ColumnError::domain("staircase never reached the stripping section"));
    };
    let bottoms_actual = last.x2;

    Ok(Staircase {
        stages,
        feed_stage,
        bottoms_actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // alpha = 2, eta = 1, xd = 0.9, xb = 0.1, R = 2.747, q = 0.5, xf = 0.5
    fn geometry(eta: Real) -> StagingGeometry {
        let equilibrium = EquilibriumModel::new(2.0, eta).unwrap();
        let rectifying = OperatingLine::rectifying(2.747_056_274_847_715, 0.9).unwrap();
        let switch = Point::new(0.438_405_748_754_884_14, 0.561_594_251_245_115_9);
        let stripping = OperatingLine::stripping(switch, 0.1).unwrap();
        StagingGeometry {
            equilibrium,
            rectifying,
            stripping,
            switch_x: switch.x,
            distillate: 0.9,
            bottoms: 0.1,
        }
    }

    #[test]
    fn first_step_starts_at_distillate() {
        let g = geometry(1.0);
        let first = g.steps(100).next().unwrap().unwrap();
        assert_eq!(first.stage, 1);
        assert_eq!(first.point.x1, 0.9);
        assert_eq!(first.point.y1, 0.9);
        assert!((first.point.x2 - 0.9 / (2.0 - 0.9)).abs() < 1e-12);
        assert!((g.rectifying.eval(first.point.x2) - first.point.y2).abs() < 1e-15);
    }

    #[test]
    fn reference_staircase() {
        let g = geometry(1.0);
        let s = construct_staircase(&g, DEFAULT_MAX_STAGES).unwrap();
        assert_eq!(s.stage_count(), 11);
        assert_eq!(s.feed_stage, 6);
        assert_eq!(s.rectifying_stages(), 5);
        assert!(s.bottoms_actual <= 0.1 && s.bottoms_actual > 0.0);
        assert!((s.bottoms_actual - 0.090_312_554_986_818_45).abs() < 1e-9);
    }

    #[test]
    fn compositions_strictly_decrease() {
        let g = geometry(0.8);
        let s = construct_staircase(&g, DEFAULT_MAX_STAGES).unwrap();
        for w in s.stages.windows(2) {
            assert!(w[1].x2 < w[0].x2);
            assert_eq!(w[1].x1, w[0].x2);
            assert_eq!(w[1].y1, w[0].y2);
        }
    }

    #[test]
    fn switch_happens_once_at_feed_stage() {
        let g = geometry(1.0);
        let steps: Vec<Step> = g.steps(100).map(Result::unwrap).collect();
        let feed = steps
            .iter()
            .position(|s| s.section == Section::Stripping)
            .unwrap();
        assert!(steps[..feed].iter().all(|s| s.section == Section::Rectifying));
        assert!(steps[feed..].iter().all(|s| s.section == Section::Stripping));
        assert!(steps[feed].point.x2 <= g.switch_x);
        assert!(steps[feed - 1].point.x2 > g.switch_x);
        // feed stage closes on the stripping line
        assert!((g.stripping.eval(steps[feed].point.x2) - steps[feed].point.y2).abs() < 1e-15);
        assert_eq!(steps.last().unwrap().next, Section::Done);
    }

    #[test]
    fn sequence_is_restartable() {
        let g = geometry(0.9);
        let a: Vec<StagePoint> = g.steps(100).map(|s| s.unwrap().point).collect();
        let b: Vec<StagePoint> = g.steps(100).map(|s| s.unwrap().point).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn cap_is_reported_as_divergence() {
        let g = geometry(1.0);
        let err = construct_staircase(&g, 3).unwrap_err();
        assert!(matches!(
            err,
            ColumnError::NumericalDivergence { stages: 3, .. }
        ));
        let mut it = g.steps(3);
        assert!(it.by_ref().take(3).all(|s| s.is_ok()));
        assert!(it.next().unwrap().is_err());
        assert!(it.next().is_none());
    }

    #[test]
    fn negligible_efficiency_diverges() {
        let g = geometry(1e-9);
        let err = construct_staircase(&g, DEFAULT_MAX_STAGES).unwrap_err();
        assert!(matches!(err, ColumnError::NumericalDivergence { .. }));
    }

    #[test]
    fn rising_operating_line_stalls() {
        // ESOL above the diagonal sends the second step back up in x
        let g = StagingGeometry {
            rectifying: OperatingLine::new(1.0, 0.5),
            ..geometry(1.0)
        };
        let err = construct_staircase(&g, DEFAULT_MAX_STAGES).unwrap_err();
        let ColumnError::NumericalDivergence { what, stages } = err else {
            panic!("expected divergence, got {err:?}");
        };
        assert_eq!(stages, 1);
        assert!(what.contains("stalled"), "{what}");
    }

    #[test]
    fn stepping_from_done_is_rejected() {
        let g = geometry(1.0);
        assert!(step(Section::Done, Point::diagonal(0.5), &g).is_err());
    }
}
