//! plotters-backed [`DiagramRenderer`].

use crate::{PlotError, PlotResult, drawing};
use mt_column::diagram::round3;
use mt_column::{Diagram, DiagramRenderer, Point, Segment};
use plotters::prelude::*;
use std::path::PathBuf;

/// Configuration for customizing the diagram.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 900)
    pub width: u32,

    /// Image height in pixels (default: 900)
    pub height: u32,

    /// Draw grid lines (default: true)
    pub show_grid: bool,

    /// Draw the rectifying line at minimum reflux (default: false)
    pub show_min_reflux: bool,

    /// Extend the q-line up to the equilibrium curve (default: false)
    pub show_full_q_line: bool,

    /// Stage label font size (default: 12)
    pub label_size: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 900,
            show_grid: true,
            show_min_reflux: false,
            show_full_q_line: false,
            label_size: 12,
        }
    }
}

/// Renders to an SVG file, or keeps the document in memory.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    config: PlotConfig,
    path: Option<PathBuf>,
    svg: String,
}

impl SvgRenderer {
    pub fn to_file(path: impl Into<PathBuf>, config: PlotConfig) -> Self {
        Self {
            config,
            path: Some(path.into()),
            svg: String::new(),
        }
    }

    pub fn in_memory(config: PlotConfig) -> Self {
        Self {
            config,
            path: None,
            svg: String::new(),
        }
    }

    /// Last rendered document.
    pub fn svg(&self) -> &str {
        &self.svg
    }
}

impl DiagramRenderer for SvgRenderer {
    type Error = PlotError;

    fn render(&mut self, diagram: &Diagram) -> PlotResult<()> {
        let mut svg = String::new();
        draw(&mut svg, diagram, &self.config)?;
        if let Some(path) = &self.path {
            std::fs::write(path, &svg)?;
            tracing::info!(path = %path.display(), "diagram written");
        }
        self.svg = svg;
        Ok(())
    }
}

fn xy(p: &Point) -> (f64, f64) {
    (p.x, p.y)
}

fn ends(s: &Segment) -> Vec<(f64, f64)> {
    vec![xy(&s.from), xy(&s.to)]
}

fn draw(svg: &mut String, diagram: &Diagram, config: &PlotConfig) -> PlotResult<()> {
    let root = SVGBackend::with_string(svg, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(diagram.title.join("   "), ("sans-serif", 14))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0f64..1f64, 0f64..1f64)
        .map_err(drawing)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc("xa").y_desc("ya");
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(drawing)?;

    let solid = BLACK.stroke_width(1);

    // Composition drop lines
    for marker in &diagram.composition_markers {
        chart
            .draw_series(DashedLineSeries::new(ends(marker), 6, 4, solid))
            .map_err(drawing)?;
    }

    // Diagonal, ideal curve, operating lines and q-line
    chart
        .draw_series(LineSeries::new(ends(&diagram.diagonal), solid))
        .map_err(drawing)?;
    chart
        .draw_series(LineSeries::new(diagram.equilibrium_ideal.iter().map(xy), solid))
        .map_err(drawing)?;
    chart
        .draw_series(DashedLineSeries::new(
            diagram.equilibrium_corrected.iter().map(xy),
            6,
            4,
            GREEN.stroke_width(1),
        ))
        .map_err(drawing)?;
    for line in [&diagram.rectifying, &diagram.stripping, &diagram.q_line] {
        chart
            .draw_series(LineSeries::new(ends(line), solid))
            .map_err(drawing)?;
    }
    if config.show_min_reflux {
        chart
            .draw_series(DashedLineSeries::new(
                ends(&diagram.minimum_reflux_line),
                6,
                4,
                RED.stroke_width(1),
            ))
            .map_err(drawing)?;
    }
    if config.show_full_q_line {
        chart
            .draw_series(DashedLineSeries::new(
                ends(&diagram.q_line_full),
                6,
                4,
                RED.stroke_width(1),
            ))
            .map_err(drawing)?;
    }

    // Staircase
    chart
        .draw_series(
            diagram
                .steps
                .iter()
                .chain(std::iter::once(&diagram.bottoms_drop))
                .map(|s| PathElement::new(ends(s), solid)),
        )
        .map_err(drawing)?;

    let label_size = config.label_size as i32;
    chart
        .draw_series(diagram.labels.iter().map(|l| {
            Text::new(
                l.stage.to_string(),
                (l.at.x, l.at.y),
                ("sans-serif", label_size),
            )
        }))
        .map_err(drawing)?;

    let s = &diagram.summary;
    let notes = [
        format!("Rmin= {}", round3(s.minimum_reflux)),
        format!("R= {}", round3(s.reflux_ratio)),
        format!("xb actual= {}", round3(s.bottoms_actual)),
        format!("Stages= {}", s.stages),
        format!("Feed Stage= {}", s.feed_stage),
    ];
    chart
        .draw_series(notes.into_iter().enumerate().map(|(i, note)| {
            Text::new(note, (0.6, 0.5 - 0.05 * i as f64), ("sans-serif", 14))
        }))
        .map_err(drawing)?;

    root.present().map_err(drawing)?;
    Ok(())
}
