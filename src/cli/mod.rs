//! Command-line parsing for the `cfit` curve fitter.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! command dispatch (`app`) and from the fitting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Family, FitType};
use crate::fit::DEFAULT_CURVE_STEPS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cfit", version, about = "Two-parameter curve fitter")]
pub struct Cli {
    /// Log level for diagnostics written to stderr.
    #[arg(
        long,
        global = true,
        env = "CFIT_LOG_LEVEL",
        default_value_t = tracing::Level::WARN
    )]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit points from a CSV file, print the summary and optionally plot/export.
    Fit(FitArgs),
    /// Re-fit and plot a saved workspace JSON.
    Plot(PlotArgs),
    /// Generate synthetic points from a known curve, then fit them.
    Demo(DemoArgs),
    /// Launch the interactive TUI.
    ///
    /// Uses the same fit pipeline as `cfit fit`, rendered with Ratatui.
    Tui(TuiArgs),
}

/// Options shared by every command that fits and prints.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Fit type for every dataset (auto, linear, exponential, logarithmic, saturation).
    ///
    /// Without it each dataset keeps its own fit type (auto for CSV input).
    #[arg(long = "fit", value_name = "TYPE")]
    pub fit_type: Option<FitType>,

    /// Number of intervals used to sample each fitted curve.
    #[arg(long, env = "CFIT_CURVE_STEPS", default_value_t = DEFAULT_CURVE_STEPS)]
    pub steps: usize,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export a standalone HTML chart page.
    #[arg(long = "export-html", value_name = "HTML")]
    pub export_html: Option<PathBuf>,

    /// Export sampled curves as CSV (`dataset,family,x,y`).
    #[arg(long = "export-curve", value_name = "CSV")]
    pub export_curve: Option<PathBuf>,

    /// Save the loaded points as a workspace JSON.
    #[arg(long = "save", value_name = "JSON")]
    pub save: Option<PathBuf>,
}

/// Options for `cfit fit`.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// CSV file with `x`,`y` (and optional `dataset`) columns.
    #[arg(short = 'f', long = "file", value_name = "CSV")]
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for plotting a saved workspace.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Workspace JSON produced by `cfit fit --save` or the TUI.
    #[arg(long, value_name = "JSON")]
    pub workspace: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for `cfit demo`.
#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Family the points are drawn from.
    #[arg(long, value_enum, default_value_t = Family::Saturation)]
    pub family: Family,

    /// Parameter `a` of the generating curve.
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub a: f64,

    /// Parameter `b` of the generating curve.
    #[arg(long, default_value_t = 0.3, allow_negative_numbers = true)]
    pub b: f64,

    /// Number of points.
    #[arg(short = 'n', long = "n", default_value_t = 30)]
    pub n_points: usize,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x_min: f64,

    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Standard deviation of the Gaussian noise added to y.
    #[arg(long, default_value_t = 0.2)]
    pub noise: f64,

    /// Random seed (same seed, same points).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write the generated points to this CSV instead of fitting them.
    #[arg(short = 'o', long = "output", value_name = "CSV")]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for the TUI.
#[derive(Debug, Args, Clone, Default)]
pub struct TuiArgs {
    /// Start from a saved workspace JSON (also the default save target).
    #[arg(long, value_name = "JSON")]
    pub workspace: Option<PathBuf>,

    /// Start from a CSV file.
    #[arg(short = 'f', long = "file", value_name = "CSV", conflicts_with = "workspace")]
    pub file: Option<PathBuf>,

    /// Number of intervals used to sample each fitted curve.
    #[arg(long, env = "CFIT_CURVE_STEPS", default_value_t = DEFAULT_CURVE_STEPS)]
    pub steps: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn fit_args_parse() {
        let cli = Cli::parse_from([
            "cfit", "fit", "-f", "pts.csv", "--fit", "optimal", "--steps", "50", "--no-plot",
        ]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.file, PathBuf::from("pts.csv"));
        assert_eq!(args.output.fit_type, Some(FitType::Auto));
        assert_eq!(args.output.steps, 50);
        assert!(args.output.no_plot);
    }

    #[test]
    fn demo_accepts_negative_values() {
        let cli = Cli::parse_from([
            "cfit", "demo", "--family", "linear", "--a", "-2", "--x-min", "-5",
        ]);
        let Command::Demo(args) = cli.command else {
            panic!("expected demo");
        };
        assert_eq!(args.family, Family::Linear);
        assert_eq!(args.a, -2.0);
        assert_eq!(args.x_min, -5.0);
    }

    #[test]
    fn unknown_fit_type_is_rejected() {
        assert!(Cli::try_parse_from(["cfit", "fit", "-f", "a.csv", "--fit", "cubic"]).is_err());
    }
}
