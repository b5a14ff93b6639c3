//! End-to-end McCabe-Thiele design of one column.

use crate::equilibrium::EquilibriumModel;
use crate::error::{ColumnError, ColumnResult};
use crate::intersect::{
    MinimumReflux, QLine, minimum_reflux, q_line_equilibrium_intersection,
    rectifying_q_intersection,
};
use crate::operating::OperatingLine;
use crate::params::{ColumnSpec, StagingConfig};
use crate::point::Point;
use crate::staging::{Staircase, StagingGeometry, construct_staircase};
use mt_core::Real;
use serde::{Deserialize, Serialize};

/// Lines and intersections derived from a [`ColumnSpec`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnGeometry {
    pub equilibrium: EquilibriumModel,
    pub q_line: QLine,
    /// q-line / equilibrium-curve intersection.
    pub pinch: Point,
    pub minimum_reflux: MinimumReflux,
    pub reflux_ratio: Real,
    pub rectifying: OperatingLine,
    /// ESOL / q-line intersection; the SSOL pivots here.
    pub feed_intersection: Point,
    pub stripping: OperatingLine,
    pub distillate: Real,
    pub bottoms: Real,
}

impl ColumnGeometry {
    pub fn build(spec: &ColumnSpec, config: &StagingConfig) -> ColumnResult<Self> {
        spec.validate()?;

        let xd = spec.distillate_composition;
        let xb = spec.bottoms_composition;
        let equilibrium =
            EquilibriumModel::new(spec.relative_volatility, spec.murphree_efficiency)?;
        let q_line = QLine::new(spec.feed_quality, spec.feed_composition, config.q_line)?;

        let pinch = q_line_equilibrium_intersection(&q_line, &equilibrium)?;
        let minimum_reflux = minimum_reflux(xd, pinch)?;
        let reflux_ratio = spec.reflux_factor * minimum_reflux.ratio;
        let rectifying = OperatingLine::rectifying(reflux_ratio, xd)?;

        let feed_intersection = rectifying_q_intersection(&q_line, &rectifying)?;
        if !(feed_intersection.x > xb && feed_intersection.x < xd) {
            return Err(ColumnError::domain(format!(
                "operating lines cross at x = {} outside the column range ({xb}, {xd})",
                feed_intersection.x
            )));
        }
        if feed_intersection.y >= equilibrium.vapor(feed_intersection.x) {
            return Err(ColumnError::domain(format!(
                "operating lines cross at ({}, {}) on or above the equilibrium curve",
                feed_intersection.x, feed_intersection.y
            )));
        }
        let stripping = OperatingLine::stripping(feed_intersection, xb)?;

        tracing::debug!(
            pinch_x = pinch.x,
            pinch_y = pinch.y,
            r_min = minimum_reflux.ratio,
            r = reflux_ratio,
            feed_x = feed_intersection.x,
            feed_y = feed_intersection.y,
            "column geometry"
        );

        Ok(Self {
            equilibrium,
            q_line,
            pinch,
            minimum_reflux,
            reflux_ratio,
            rectifying,
            feed_intersection,
            stripping,
            distillate: xd,
            bottoms: xb,
        })
    }

    pub fn staging(&self) -> StagingGeometry {
        StagingGeometry {
            equilibrium: self.equilibrium,
            rectifying: self.rectifying,
            stripping: self.stripping,
            switch_x: self.feed_intersection.x,
            distillate: self.distillate,
            bottoms: self.bottoms,
        }
    }
}

/// Headline numbers of a design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignSummary {
    pub relative_volatility: Real,
    pub minimum_reflux: Real,
    pub reflux_ratio: Real,
    pub stages: usize,
    pub feed_stage: usize,
    pub bottoms_actual: Real,
}

/// A completed construction: inputs, geometry and staircase.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDesign {
    pub spec: ColumnSpec,
    pub geometry: ColumnGeometry,
    pub staircase: Staircase,
}

impl ColumnDesign {
    pub fn stage_count(&self) -> usize {
        self.staircase.stage_count()
    }

    pub fn feed_stage(&self) -> usize {
        self.staircase.feed_stage
    }

    pub fn summary(&self) -> DesignSummary {
        DesignSummary {
            relative_volatility: self.spec.relative_volatility,
            minimum_reflux: self.geometry.minimum_reflux.ratio,
            reflux_ratio: self.geometry.reflux_ratio,
            stages: self.staircase.stage_count(),
            feed_stage: self.staircase.feed_stage,
            bottoms_actual: self.staircase.bottoms_actual,
        }
    }
}

/// Validate `spec`, derive the geometry and step off the stages.
pub fn design_column(spec: &ColumnSpec, config: &StagingConfig) -> ColumnResult<ColumnDesign> {
    let geometry = ColumnGeometry::build(spec, config)?;
    let staircase = construct_staircase(&geometry.staging(), config.max_stages)?;

    tracing::info!(
        r_min = geometry.minimum_reflux.ratio,
        r = geometry.reflux_ratio,
        stages = staircase.stage_count(),
        feed_stage = staircase.feed_stage,
        xb_actual = staircase.bottoms_actual,
        "McCabe-Thiele construction complete"
    );

    Ok(ColumnDesign {
        spec: *spec,
        geometry,
        staircase,
    })
}
