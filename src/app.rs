//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initializes logging
//! - loads points (CSV, workspace JSON or synthetic)
//! - runs the fit pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::{debug, info};

use crate::cli::{Command, DemoArgs, FitArgs, OutputArgs, PlotArgs, TuiArgs};
use crate::data::{SynthSpec, generate_samples, write_samples_csv};
use crate::domain::{FitConfig, Params};
use crate::error::AppError;
use crate::session::Workspace;

pub mod pipeline;

/// Entry point for the `cfit` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is fine; everything has a CLI default.
    dotenvy::dotenv().ok();

    // We want `cfit` and `cfit --workspace ws.json` to behave like `cfit tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Plot(args) => handle_plot(args),
        Command::Demo(args) => handle_demo(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args.output);
    let ingest = crate::io::load_points(&args.file)?;
    if !ingest.row_errors.is_empty() {
        eprintln!(
            "Skipped {} of {} row(s) in {}.",
            ingest.row_errors.len(),
            ingest.rows_read,
            args.file.display()
        );
    }
    info!(
        rows = ingest.rows_used,
        datasets = ingest.sets.len(),
        "points loaded"
    );

    let workspace = Workspace::from_named_points(ingest.sets);
    fit_and_report(&workspace, &config)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args.output);
    let workspace = crate::io::read_workspace_json(&args.workspace)?;
    fit_and_report(&workspace, &config)
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let spec = SynthSpec {
        family: args.family,
        params: Params::new(args.a, args.b),
        n_points: args.n_points,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
        seed: args.seed,
    };
    let samples = generate_samples(&spec)?;

    if let Some(path) = &args.out {
        write_samples_csv(path, &samples)?;
        println!("Wrote {} point(s) to {}", samples.len(), path.display());
        return Ok(());
    }

    let name = format!("{} demo", args.family.display_name());
    let workspace = Workspace::from_named_points(vec![(name, samples)]);
    fit_and_report(&workspace, &fit_config_from_args(&args.output))
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

/// Fit every visible dataset, print the summary/plot and write requested files.
fn fit_and_report(workspace: &Workspace, config: &FitConfig) -> Result<(), AppError> {
    let fits = pipeline::fit_workspace(workspace, config);

    println!("{}", crate::report::format_run_summary(&fits, config));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&fits, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    let (landscape, portrait) = crate::report::auto_scale_labels(workspace);
    println!("A4 landscape: {landscape}");
    println!("A4 portrait:  {portrait}");

    if let Some(path) = &config.export_html {
        crate::io::write_html(path, workspace, &fits)?;
        println!("Exported {}", path.display());
    }
    if let Some(path) = &config.export_curve {
        crate::io::write_curve_csv(path, &fits)?;
        println!("Exported {}", path.display());
    }
    if let Some(path) = &config.save_workspace {
        crate::io::write_workspace_json(path, workspace)?;
        println!("Saved {}", path.display());
    }

    Ok(())
}

pub fn fit_config_from_args(args: &OutputArgs) -> FitConfig {
    FitConfig {
        fit_type: args.fit_type,
        curve_steps: args.steps,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_html: args.export_html.clone(),
        export_curve: args.export_curve.clone(),
        save_workspace: args.save.clone(),
    }
}

/// Rewrite argv so `cfit` defaults to `cfit tui`.
///
/// Rules:
/// - `cfit`                          -> `cfit tui`
/// - `cfit --workspace ws.json ...`  -> `cfit tui --workspace ws.json ...`
/// - `cfit --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "plot" | "demo" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        debug!("no subcommand given, defaulting to tui");
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is so clap reports the unknown subcommand.
    argv
}
