//! McCabe-Thiele construction for binary distillation.
//!
//! Given a relative volatility, product and feed compositions, feed quality q,
//! Murphree efficiency and a reflux factor, this crate derives the equilibrium
//! curve, the operating lines and the minimum and actual reflux ratios. It then
//! steps off equilibrium stages between them to find the stage count and the
//! optimal feed stage.
//!
//! ```
//! use mt_column::{ColumnSpec, StagingConfig, design_column};
//!
//! let spec = ColumnSpec::new(2.5, 0.5, 0.95, 0.05)
//!     .with_feed_quality(1.0)
//!     .with_reflux_factor(1.5);
//! let design = design_column(&spec, &StagingConfig::default()).unwrap();
//! assert!(design.feed_stage() <= design.stage_count());
//! ```

pub mod design;
pub mod diagram;
pub mod equilibrium;
pub mod error;
pub mod intersect;
pub mod operating;
pub mod params;
pub mod point;
pub mod quadratic;
pub mod staging;
pub mod sweep;

pub use design::{ColumnDesign, ColumnGeometry, DesignSummary, design_column};
pub use diagram::{CURVE_SAMPLES, Diagram, DiagramRenderer, StageLabel};
pub use equilibrium::{
    EquilibriumModel, equilibrium, equilibrium_with_efficiency,
    inverse_equilibrium_with_efficiency,
};
pub use error::{ColumnError, ColumnResult};
pub use intersect::{MinimumReflux, Q_NUDGE, QLine, QLineTreatment};
pub use operating::OperatingLine;
pub use params::{ColumnSpec, StagingConfig, relative_volatility};
pub use point::{Point, Segment};
pub use staging::{DEFAULT_MAX_STAGES, Section, StagePoint, Staircase, StagingGeometry};
pub use sweep::{RefluxSweep, SweepRow, sweep_reflux};
