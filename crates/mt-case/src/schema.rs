//! Case schema definitions.

use crate::CaseResult;
use mt_column::{ColumnSpec, StagingConfig};
use mt_core::units::kpa;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub version: u32,
    pub name: String,
    /// More volatile component.
    pub light: ComponentDef,
    /// Less volatile component.
    pub heavy: ComponentDef,
    pub feed: FeedDef,
    pub distillate_composition: f64,
    pub bottoms_composition: f64,
    /// Actual reflux as a multiple of minimum reflux.
    pub reflux_factor: f64,
    #[serde(default = "default_efficiency")]
    pub murphree_efficiency: f64,
    #[serde(default)]
    pub staging: StagingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDef {
    pub name: String,
    pub vapor_pressure_kpa: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedDef {
    pub composition: f64,
    /// Liquid fraction of the feed.
    pub q: f64,
}

fn default_efficiency() -> f64 {
    1.0
}

impl Case {
    /// Physical parameters for the column design.
    pub fn to_column_spec(&self) -> CaseResult<ColumnSpec> {
        let spec = ColumnSpec::from_vapor_pressures(
            kpa(self.light.vapor_pressure_kpa),
            kpa(self.heavy.vapor_pressure_kpa),
            self.feed.composition,
            self.distillate_composition,
            self.bottoms_composition,
        )?
        .with_feed_quality(self.feed.q)
        .with_efficiency(self.murphree_efficiency)
        .with_reflux_factor(self.reflux_factor);
        spec.validate()?;
        Ok(spec)
    }
}
