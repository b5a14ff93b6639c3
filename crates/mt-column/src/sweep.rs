//! Reflux-factor sweeps: stage count as a function of reflux.
//!
//! Each point is an independent construction, so points are evaluated on the
//! rayon pool and collected back in sweep order.

use crate::design::{DesignSummary, design_column};
use crate::error::{ColumnError, ColumnResult};
use crate::params::{ColumnSpec, StagingConfig};
use mt_core::{Real, linspace};
use rayon::prelude::*;

/// Linearly spaced reflux factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefluxSweep {
    pub start: Real,
    pub end: Real,
    pub points: usize,
}

impl RefluxSweep {
    pub fn new(start: Real, end: Real, points: usize) -> ColumnResult<Self> {
        if points < 2 {
            return Err(ColumnError::domain("sweep must have at least 2 points"));
        }
        if !(start.is_finite() && end.is_finite()) {
            return Err(ColumnError::domain("sweep bounds must be finite"));
        }
        if (start - end).abs() < 1e-12 {
            return Err(ColumnError::domain("start and end values must be different"));
        }
        if start.min(end) <= 1.0 {
            return Err(ColumnError::domain(format!(
                "reflux factors must exceed 1, got range {start}..{end}"
            )));
        }
        Ok(Self { start, end, points })
    }

    pub fn factors(&self) -> Vec<Real> {
        linspace(self.start, self.end, self.points)
    }
}

/// One sweep point. Failures are kept per row instead of aborting the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    pub reflux_factor: Real,
    pub outcome: ColumnResult<DesignSummary>,
}

pub fn sweep_reflux(spec: &ColumnSpec, config: &StagingConfig, sweep: &RefluxSweep) -> Vec<SweepRow> {
    sweep
        .factors()
        .into_par_iter()
        .map(|reflux_factor| {
            let outcome = design_column(&spec.with_reflux_factor(reflux_factor), config)
                .map(|design| design.summary());
            if let Err(e) = &outcome {
                tracing::warn!(reflux_factor, error = %e, "sweep point failed");
            }
            SweepRow {
                reflux_factor,
                outcome,
            }
        })
        .collect()
}
