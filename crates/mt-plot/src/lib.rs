//! Static SVG rendering of McCabe-Thiele diagrams.
//!
//! This crate uses the `plotters` SVG backend to draw a [`Diagram`] computed by
//! `mt-column`. It only consumes geometry; all numbers come from the design.
//!
//! ```rust,ignore
//! use mt_column::{DiagramRenderer, CURVE_SAMPLES};
//! use mt_plot::{PlotConfig, SvgRenderer};
//!
//! let diagram = design.diagram(CURVE_SAMPLES);
//! let mut renderer = SvgRenderer::to_file("mccabe.svg", PlotConfig::default());
//! renderer.render(&diagram)?;
//! ```

pub mod svg;

pub use svg::{PlotConfig, SvgRenderer};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Drawing error: {0}")]
    Drawing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PlotResult<T> = Result<T, PlotError>;

pub(crate) fn drawing(e: impl std::fmt::Display) -> PlotError {
    PlotError::Drawing(e.to_string())
}
