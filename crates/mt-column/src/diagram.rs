//! Render-ready geometry of a McCabe-Thiele diagram.
//!
//! Nothing here draws. [`Diagram`] collects the segments, curves and labels a
//! renderer needs, and [`DiagramRenderer`] is the seam a drawing backend plugs
//! into.

use crate::design::{ColumnDesign, DesignSummary};
use crate::intersect::QLine;
use crate::point::{Point, Segment};
use mt_core::Real;
use serde::{Deserialize, Serialize};

/// Default number of samples along the equilibrium curves.
pub const CURVE_SAMPLES: usize = 100;

/// Offset of a stage label from the stage corner on the curve.
pub const LABEL_OFFSET: Real = 0.045;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageLabel {
    pub stage: usize,
    pub at: Point,
}

/// Everything needed to draw one construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub title: Vec<String>,
    pub summary: DesignSummary,
    pub diagonal: Segment,
    pub equilibrium_ideal: Vec<Point>,
    pub equilibrium_corrected: Vec<Point>,
    /// ESOL from `(xd, xd)` to the feed intersection.
    pub rectifying: Segment,
    /// SSOL from `(xb, xb)` to the feed intersection.
    pub stripping: Segment,
    /// q-line from `(xf, xf)` to the feed intersection.
    pub q_line: Segment,
    /// q-line from `(xf, xf)` to the equilibrium curve.
    pub q_line_full: Segment,
    /// ESOL at minimum reflux, from `(xd, xd)` to `(0, θ_min)`.
    pub minimum_reflux_line: Segment,
    /// Dashed drop lines at xd, xb and xf.
    pub composition_markers: Vec<Segment>,
    /// Alternating horizontal and vertical staircase segments.
    pub steps: Vec<Segment>,
    /// Drop from the last stage to the x axis.
    pub bottoms_drop: Segment,
    pub labels: Vec<StageLabel>,
}

/// A drawing backend for [`Diagram`]s.
pub trait DiagramRenderer {
    type Error;

    fn render(&mut self, diagram: &Diagram) -> Result<(), Self::Error>;
}

impl Diagram {
    pub fn from_design(design: &ColumnDesign, samples: usize) -> Self {
        let spec = &design.spec;
        let g = &design.geometry;
        let xd = spec.distillate_composition;
        let xb = spec.bottoms_composition;
        let xf = spec.feed_composition;

        let (equilibrium_ideal, equilibrium_corrected) = g.equilibrium.curve(samples);

        let mut steps = Vec::with_capacity(2 * design.staircase.stages.len());
        let mut labels = Vec::with_capacity(design.staircase.stages.len());
        for (i, sp) in design.staircase.stages.iter().enumerate() {
            steps.push(Segment::new(Point::new(sp.x1, sp.y1), sp.on_curve()));
            steps.push(Segment::new(sp.on_curve(), sp.on_line()));
            labels.push(StageLabel {
                stage: i + 1,
                at: Point::new(sp.x2 - LABEL_OFFSET, sp.y1 + LABEL_OFFSET),
            });
        }

        let bottoms_drop = design
            .staircase
            .stages
            .last()
            .map(|sp| Segment::new(sp.on_curve(), Point::new(sp.x2, 0.0)))
            .unwrap_or(Segment::new(Point::diagonal(xb), Point::new(xb, 0.0)));

        let marker = |v: Real| Segment::new(Point::new(v, 0.0), Point::diagonal(v));

        Diagram {
            title: title_lines(design, &g.q_line),
            summary: design.summary(),
            diagonal: Segment::new(Point::diagonal(0.0), Point::diagonal(1.0)),
            equilibrium_ideal,
            equilibrium_corrected,
            rectifying: Segment::new(Point::diagonal(xd), g.feed_intersection),
            stripping: Segment::new(Point::diagonal(xb), g.feed_intersection),
            q_line: Segment::new(g.q_line.feed_point(), g.feed_intersection),
            q_line_full: Segment::new(g.q_line.feed_point(), g.pinch),
            minimum_reflux_line: Segment::new(
                Point::diagonal(xd),
                Point::new(0.0, g.minimum_reflux.theta),
            ),
            composition_markers: vec![marker(xd), marker(xb), marker(xf)],
            steps,
            bottoms_drop,
            labels,
        }
    }
}

fn title_lines(design: &ColumnDesign, q_line: &QLine) -> Vec<String> {
    let spec = &design.spec;
    vec![
        format!(
            "xd={}   xb={}",
            spec.distillate_composition, spec.bottoms_composition
        ),
        format!("zf={}    q={}", spec.feed_composition, round3(q_line.q())),
        format!(
            "R={}*Rmin   Murphree Efficiency={}",
            spec.reflux_factor, spec.murphree_efficiency
        ),
    ]
}

/// Round to three decimals for annotations.
pub fn round3(v: Real) -> Real {
    (v * 1000.0).round() / 1000.0
}

impl ColumnDesign {
    pub fn diagram(&self, samples: usize) -> Diagram {
        Diagram::from_design(self, samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::design_column;
    use crate::params::{ColumnSpec, StagingConfig};

    fn diagram() -> Diagram {
        let spec = ColumnSpec::new(179.2 / 74.3, 0.5, 0.975, 0.025)
            .with_feed_quality(0.5)
            .with_efficiency(0.75)
            .with_reflux_factor(1.3);
        design_column(&spec, &StagingConfig::default())
            .unwrap()
            .diagram(CURVE_SAMPLES)
    }

    #[test]
    fn staircase_segments_are_connected() {
        let d = diagram();
        assert_eq!(d.steps.len(), 2 * d.summary.stages);
        assert_eq!(d.labels.len(), d.summary.stages);
        for w in d.steps.windows(2) {
            assert_eq!(w[0].to, w[1].from);
        }
        let first = d.steps[0];
        assert_eq!(first.from, Point::diagonal(0.975));
        assert_eq!(d.bottoms_drop.to.y, 0.0);
        assert_eq!(d.bottoms_drop.from.x, d.summary.bottoms_actual);
    }

    #[test]
    fn lines_meet_at_feed_intersection() {
        let d = diagram();
        assert_eq!(d.rectifying.to, d.stripping.to);
        assert_eq!(d.q_line.to, d.rectifying.to);
        assert_eq!(d.q_line.from, Point::diagonal(0.5));
        assert_eq!(d.composition_markers.len(), 3);
    }

    #[test]
    fn labels_are_offset_from_curve_corner() {
        let d = diagram();
        let corner = d.steps[0].to;
        let label = d.labels[0];
        assert_eq!(label.stage, 1);
        assert!((label.at.x - (corner.x - LABEL_OFFSET)).abs() < 1e-15);
        assert!((label.at.y - (corner.y + LABEL_OFFSET)).abs() < 1e-15);
    }

    #[test]
    fn title_mentions_inputs() {
        let d = diagram();
        let joined = d.title.join("\n");
        assert!(joined.contains("xd=0.975"));
        assert!(joined.contains("q=0.5"));
        assert!(joined.contains("R=1.3*Rmin"));
        assert!(joined.contains("Murphree Efficiency=0.75"));
    }

    #[test]
    fn diagram_serializes_to_json() {
        let d = diagram();
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"equilibrium_ideal\""));
        let back: Diagram = serde_json::from_str(&json).unwrap();
        assert_eq!(back.summary.stages, d.summary.stages);
    }

    #[test]
    fn round3_rounds_half_away() {
        assert_eq!(round3(2.432_79), 2.433);
        assert_eq!(round3(0.017_502), 0.018);
    }
}
