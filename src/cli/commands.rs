use crate::cli::error::CliError;
use crate::cli::output::{
    format_mapping, format_mapping_warning, format_preview, get_terminal_width, hierarchy_values,
    is_tty, HierarchyView, Styler, SIMULATION_COMPLETE,
};
use crate::config::{ColorMode, Config};
use crate::loader::load_table;
use crate::mapping::{check_mapping, map_columns};
use crate::models::{ColumnMapping, Table};
use crate::sim::{run_example, SimulationAvailability};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "powertier")]
#[command(about = "Map spreadsheet columns onto the electricity distribution hierarchy and simulate power flow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// A spreadsheet to read
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Spreadsheet file (.csv, .xlsx, .xlsm, .xls, .xlsb or .ods)
    pub file: PathBuf,
    /// Worksheet to read (defaults to the first sheet)
    #[arg(long)]
    pub sheet: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show which column was detected for each hierarchy level
    Map {
        #[command(flatten)]
        source: SourceArgs,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show the hierarchy table and textual hierarchy
    Show {
        #[command(flatten)]
        source: SourceArgs,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Run the example electricity flow simulation
    Simulate {
        /// Output the run report in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Load a file, show its preview and hierarchy, and optionally simulate
    Run {
        #[command(flatten)]
        source: SourceArgs,
        /// Run the example simulation after showing the hierarchy
        #[arg(long)]
        simulate: bool,
    },
}

/// Everything a command needs that is decided once at startup
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub availability: SimulationAvailability,
    pub styler: Styler,
    pub width: usize,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let availability = SimulationAvailability::check(&config);
        let use_color = match config.color {
            ColorMode::Auto => is_tty(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        };
        // Windows consoles need ANSI processing switched on first
        let use_color = use_color && enable_ansi_support::enable_ansi_support().is_ok();

        Self {
            config,
            availability,
            styler: Styler::new(use_color),
            width: get_terminal_width(),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = Config::config_path()?;
    let config = Config::load_from(&config_path)?;
    let ctx = AppContext::new(config);
    log::debug!("Simulation availability: {:?}", ctx.availability);

    match cli.command {
        Commands::Map { source, json } => handle_map(&ctx, &source, json),
        Commands::Show { source, json } => handle_show(&ctx, &source, json),
        Commands::Simulate { json } => handle_simulate(&ctx, json),
        Commands::Run { source, simulate } => handle_run(&ctx, &source, simulate),
    }
}

fn load(source: &SourceArgs) -> Result<Table> {
    let table = load_table(&source.file, source.sheet.as_deref()).map_err(CliError::from)?;
    Ok(table)
}

fn warn_if_incomplete(ctx: &AppContext, table: &Table, mapping: &ColumnMapping) {
    if let Some(warning) = check_mapping(table.columns(), mapping) {
        eprintln!("{}", format_mapping_warning(&warning, &ctx.styler));
    }
}

fn handle_map(ctx: &AppContext, source: &SourceArgs, json: bool) -> Result<()> {
    let table = load(source)?;
    let mapping = map_columns(table.columns());

    if json {
        let missing: Vec<&str> = mapping.missing().iter().map(|s| s.key()).collect();
        let json_mapping = serde_json::json!({
            "mapping": mapping,
            "missing": missing,
        });
        println!("{}", serde_json::to_string_pretty(&json_mapping)?);
        return Ok(());
    }

    print!("{}", format_mapping(&mapping, &ctx.styler));
    warn_if_incomplete(ctx, &table, &mapping);
    Ok(())
}

fn handle_show(ctx: &AppContext, source: &SourceArgs, json: bool) -> Result<()> {
    let table = load(source)?;
    let mapping = map_columns(table.columns());

    if json {
        let rows: Vec<serde_json::Value> = if mapping.is_complete() {
            (0..table.row_count().min(ctx.config.hierarchy_rows))
                .filter_map(|row| hierarchy_values(&table, &mapping, row))
                .map(|values| {
                    let object: serde_json::Map<String, serde_json::Value> = values
                        .into_iter()
                        .map(|(stage, value)| (stage.key().to_string(), serde_json::json!(value)))
                        .collect();
                    serde_json::Value::Object(object)
                })
                .collect()
        } else {
            Vec::new()
        };
        let json_view = serde_json::json!({
            "complete": mapping.is_complete(),
            "mapping": mapping,
            "rows": rows,
        });
        println!("{}", serde_json::to_string_pretty(&json_view)?);
        return Ok(());
    }

    warn_if_incomplete(ctx, &table, &mapping);
    print_hierarchy(ctx, &table, &mapping);
    Ok(())
}

fn print_hierarchy(ctx: &AppContext, table: &Table, mapping: &ColumnMapping) {
    let view = HierarchyView::build(
        table,
        mapping,
        ctx.config.hierarchy_rows,
        ctx.config.summary_rows,
        ctx.width,
    );
    print!("{}", view.render(&ctx.styler));
}

fn ensure_available(ctx: &AppContext) -> Result<()> {
    if let SimulationAvailability::Unavailable { reason } = &ctx.availability {
        return Err(CliError::SimulationUnavailable { reason: reason.clone() }.into());
    }
    Ok(())
}

fn handle_simulate(ctx: &AppContext, json: bool) -> Result<()> {
    if json {
        ensure_available(ctx)?;
        let report = run_example(&mut std::io::sink()).map_err(CliError::from)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", ctx.styler.bold("Simulate Electricity Flow"));
    ensure_available(ctx)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_example(&mut out).map_err(CliError::from)?;
    drop(out);

    println!("{}", ctx.styler.success(SIMULATION_COMPLETE));
    Ok(())
}

fn handle_run(ctx: &AppContext, source: &SourceArgs, simulate: bool) -> Result<()> {
    let table = load(source)?;
    println!("{}", ctx.styler.success("Workbook loaded successfully!"));
    println!("{}", format_preview(&table, ctx.config.preview_rows, ctx.width));

    let mapping = map_columns(table.columns());
    warn_if_incomplete(ctx, &table, &mapping);
    print_hierarchy(ctx, &table, &mapping);

    if simulate {
        println!();
        handle_simulate(ctx, false)?;
    } else if !ctx.availability.is_available() {
        println!("{}", ctx.styler.dim("Simulation model not available; --simulate is disabled."));
    }

    Ok(())
}
