use clap::{Parser, Subcommand};
use mt_case::{Case, CaseError};
use mt_column::{
    CURVE_SAMPLES, ColumnDesign, ColumnError, DiagramRenderer, RefluxSweep, SweepRow,
    design_column, sweep_reflux,
};
use mt_plot::{PlotConfig, PlotError, SvgRenderer};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mccabe")]
#[command(about = "McCabe-Thiele binary distillation staging tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate case file syntax and values
    Validate {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
    /// Construct the staircase and print the design summary
    Solve {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Print the design summary as JSON
        #[arg(long)]
        json: bool,
        /// List every stage point
        #[arg(long)]
        stages: bool,
    },
    /// Render the McCabe-Thiele diagram as SVG
    Plot {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Output SVG file path
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value_t = 900)]
        width: u32,
        #[arg(long, default_value_t = 900)]
        height: u32,
        /// Draw the rectifying line at minimum reflux
        #[arg(long)]
        min_reflux: bool,
        /// Extend the q-line up to the equilibrium curve
        #[arg(long)]
        full_q_line: bool,
        #[arg(long)]
        no_grid: bool,
        /// Also write the diagram geometry as JSON
        #[arg(long)]
        geometry: Option<PathBuf>,
    },
    /// Stage count over a range of reflux factors
    Sweep {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        #[arg(long, default_value_t = 1.05)]
        from: f64,
        #[arg(long, default_value_t = 4.0)]
        to: f64,
        #[arg(long, default_value_t = 20)]
        points: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Case(#[from] CaseError),

    #[error(transparent)]
    Column(#[from] ColumnError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Solve {
            case_path,
            json,
            stages,
        } => cmd_solve(&case_path, json, stages),
        Commands::Plot {
            case_path,
            output,
            width,
            height,
            min_reflux,
            full_q_line,
            no_grid,
            geometry,
        } => {
            let config = PlotConfig {
                width,
                height,
                show_grid: !no_grid,
                show_min_reflux: min_reflux,
                show_full_q_line: full_q_line,
                ..PlotConfig::default()
            };
            cmd_plot(&case_path, &output, config, geometry.as_deref())
        }
        Commands::Sweep {
            case_path,
            from,
            to,
            points,
            output,
        } => cmd_sweep(&case_path, from, to, points, output.as_deref()),
    }
}

fn solve_case(case: &Case) -> CliResult<ColumnDesign> {
    let spec = case.to_column_spec()?;
    Ok(design_column(&spec, &case.staging)?)
}

fn cmd_validate(case_path: &Path) -> CliResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = mt_case::load(case_path)?;
    case.to_column_spec()?;
    println!("✓ Case '{}' is valid", case.name);
    Ok(())
}

fn cmd_solve(case_path: &Path, json: bool, stages: bool) -> CliResult<()> {
    let case = mt_case::load(case_path)?;
    let design = solve_case(&case)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&design.summary())?);
        if stages {
            println!("{}", serde_json::to_string_pretty(&design.staircase)?);
        }
        return Ok(());
    }

    let s = design.summary();
    println!("Case: {}", case.name);
    println!("  {} / {}", case.light.name, case.heavy.name);
    println!("  Relative volatility: {:.4}", s.relative_volatility);
    println!("  Minimum reflux ratio: {:.4}", s.minimum_reflux);
    println!("  Reflux ratio: {:.4}", s.reflux_ratio);
    println!("  Stages: {}", s.stages);
    println!("  Feed stage: {}", s.feed_stage);
    println!("  Bottoms composition reached: {:.4}", s.bottoms_actual);

    if stages {
        println!("\n  stage        x          y");
        for (i, p) in design.staircase.stages.iter().enumerate() {
            let marker = if i + 1 == s.feed_stage { " (feed)" } else { "" };
            println!("  {:>5}  {:>9.5}  {:>9.5}{}", i + 1, p.x2, p.y1, marker);
        }
    }
    Ok(())
}

fn cmd_plot(
    case_path: &Path,
    output: &Path,
    config: PlotConfig,
    geometry: Option<&Path>,
) -> CliResult<()> {
    let case = mt_case::load(case_path)?;
    let design = solve_case(&case)?;
    let diagram = design.diagram(CURVE_SAMPLES);

    let mut renderer = SvgRenderer::to_file(output, config);
    renderer.render(&diagram)?;
    println!("✓ Diagram written to {}", output.display());

    if let Some(path) = geometry {
        std::fs::write(path, serde_json::to_string_pretty(&diagram)?)?;
        println!("✓ Geometry written to {}", path.display());
    }
    Ok(())
}

/// Quote a CSV cell, doubling embedded quotes.
fn csv_quoted(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn sweep_csv(rows: &[SweepRow]) -> String {
    let mut csv = String::from("reflux_factor,reflux_ratio,stages,feed_stage,bottoms_actual,error\n");
    for row in rows {
        match &row.outcome {
            Ok(s) => csv.push_str(&format!(
                "{},{},{},{},{},\n",
                row.reflux_factor, s.reflux_ratio, s.stages, s.feed_stage, s.bottoms_actual
            )),
            Err(e) => csv.push_str(&format!(
                "{},,,,,{}\n",
                row.reflux_factor,
                csv_quoted(&e.to_string())
            )),
        }
    }
    csv
}

fn cmd_sweep(
    case_path: &Path,
    from: f64,
    to: f64,
    points: usize,
    output: Option<&Path>,
) -> CliResult<()> {
    let case = mt_case::load(case_path)?;
    let spec = case.to_column_spec()?;
    let sweep = RefluxSweep::new(from, to, points)?;
    let rows = sweep_reflux(&spec, &case.staging, &sweep);
    let csv = sweep_csv(&rows);

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} sweep points to {}", rows.len(), path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}
