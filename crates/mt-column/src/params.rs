//! Separation parameters and staging options.

use crate::error::{ColumnError, ColumnResult};
use crate::intersect::QLineTreatment;
use crate::staging::DEFAULT_MAX_STAGES;
use mt_core::units::{Pressure, pressure_ratio};
use mt_core::{Real, ensure_fraction};
use serde::{Deserialize, Serialize};

/// One binary separation problem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Relative volatility of the light component, α.
    pub relative_volatility: Real,
    /// Feed composition xf (mole fraction of the light component).
    pub feed_composition: Real,
    /// Distillate composition xd.
    pub distillate_composition: Real,
    /// Bottoms composition xb.
    pub bottoms_composition: Real,
    /// Liquid fraction of the feed, q.
    pub feed_quality: Real,
    /// Murphree stage efficiency η.
    pub murphree_efficiency: Real,
    /// Actual reflux as a multiple of minimum reflux.
    pub reflux_factor: Real,
}

/// Relative volatility from the two pure-component vapor pressures.
pub fn relative_volatility(light: Pressure, heavy: Pressure) -> ColumnResult<Real> {
    for (p, what) in [(light, "light"), (heavy, "heavy")] {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(ColumnError::domain(format!(
                "{what} component vapor pressure must be positive, got {} Pa",
                p.value
            )));
        }
    }
    Ok(pressure_ratio(light, heavy).value)
}

impl ColumnSpec {
    /// Saturated-liquid feed, ideal stages and 1.5 × minimum reflux.
    pub fn new(relative_volatility: Real, feed: Real, distillate: Real, bottoms: Real) -> Self {
        Self {
            relative_volatility,
            feed_composition: feed,
            distillate_composition: distillate,
            bottoms_composition: bottoms,
            feed_quality: 1.0,
            murphree_efficiency: 1.0,
            reflux_factor: 1.5,
        }
    }

    pub fn from_vapor_pressures(
        light: Pressure,
        heavy: Pressure,
        feed: Real,
        distillate: Real,
        bottoms: Real,
    ) -> ColumnResult<Self> {
        Ok(Self::new(
            relative_volatility(light, heavy)?,
            feed,
            distillate,
            bottoms,
        ))
    }

    pub fn with_feed_quality(mut self, q: Real) -> Self {
        self.feed_quality = q;
        self
    }

    pub fn with_efficiency(mut self, eta: Real) -> Self {
        self.murphree_efficiency = eta;
        self
    }

    pub fn with_reflux_factor(mut self, factor: Real) -> Self {
        self.reflux_factor = factor;
        self
    }

    /// Check the physical assumptions the construction relies on.
    pub fn validate(&self) -> ColumnResult<()> {
        let alpha = self.relative_volatility;
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(ColumnError::domain(format!(
                "relative volatility must be positive and finite, got {alpha}"
            )));
        }
        if alpha <= 1.0 {
            return Err(ColumnError::domain(format!(
                "relative volatility {alpha} <= 1: the light component must be the more volatile one"
            )));
        }

        let xf = open_fraction(self.feed_composition, "feed composition")?;
        let xd = open_fraction(self.distillate_composition, "distillate composition")?;
        let xb = open_fraction(self.bottoms_composition, "bottoms composition")?;
        if !(xb < xf && xf < xd) {
            return Err(ColumnError::domain(format!(
                "compositions must satisfy xb < xf < xd (xb = {xb}, xf = {xf}, xd = {xd})"
            )));
        }

        if !self.feed_quality.is_finite() {
            return Err(ColumnError::domain(format!(
                "feed quality q must be finite, got {}",
                self.feed_quality
            )));
        }

        let eta = self.murphree_efficiency;
        if !eta.is_finite() || eta <= 0.0 || eta > 1.0 {
            return Err(ColumnError::domain(format!(
                "Murphree efficiency must lie in (0, 1], got {eta}"
            )));
        }

        let factor = self.reflux_factor;
        if !factor.is_finite() || factor <= 1.0 {
            return Err(ColumnError::domain(format!(
                "reflux factor must exceed 1 (R at or below R_min never reaches the feed), got {factor}"
            )));
        }
        Ok(())
    }
}

fn open_fraction(v: Real, what: &'static str) -> ColumnResult<Real> {
    let v = ensure_fraction(v, what).map_err(|e| ColumnError::domain(e.to_string()))?;
    if v == 0.0 || v == 1.0 {
        return Err(ColumnError::domain(format!(
            "{what} must lie strictly between 0 and 1, got {v}"
        )));
    }
    Ok(v)
}

/// Staging options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Safety cap on the number of equilibrium stages.
    pub max_stages: usize,
    pub q_line: QLineTreatment,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            max_stages: DEFAULT_MAX_STAGES,
            q_line: QLineTreatment::Exact,
        }
    }
}
