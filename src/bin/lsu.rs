use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use lsu_rs::color::ColorRegistry;
use lsu_rs::figure::{SubplotLayout, fixed_size_subplots_with};
use lsu_rs::logger::{ScienceLogger, Verbosity};
use lsu_rs::style::Styles;
use lsu_rs::table::{Cell, Table, TableFormat, format_statistics_table};
use lsu_rs::{ColorScheme, LoggerConfig, create_custom_colormap};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "lsu",
    version,
    about = "Style presets, colors, statistics tables and run logging for scientific figures"
)]
struct Cli {
    /// Write log records without the blue console tint.
    #[arg(long, global = true, default_value_t = false)]
    no_color: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in style presets.
    Styles,
    /// Print the merged parameters of one or more presets as JSON (first name wins).
    Style {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List the named color registry with hex codes.
    Colors,
    /// Print a CSV file as a heavy-grid table.
    Table(TableArgs),
    /// Render a fixed-size subplot demo through a logger run.
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
struct TableArgs {
    csv: PathBuf,
    /// Maximum column width before wrapping (0 disables wrapping).
    #[arg(long, default_value_t = 10)]
    max_width: usize,
    /// Decimals for floating point cells.
    #[arg(long, default_value_t = 3)]
    precision: usize,
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Run name; output goes to <base>/<name>/.
    #[arg(long, default_value = "lsu_demo")]
    name: String,
    /// Base directory (default: $THESIS_BASE_DIRECTORY or the current directory).
    #[arg(long)]
    base: Option<PathBuf>,
    /// Read the run from a JSON config instead of the flags below.
    #[arg(long, conflicts_with_all = ["name", "base"])]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Verbosity::Save)]
    figures: Verbosity,
    #[arg(long, value_enum, default_value_t = Verbosity::Save)]
    statistics: Verbosity,
    #[arg(long, value_enum, default_value_t = Verbosity::Show)]
    integrity: Verbosity,
    /// Presets for the demo figure.
    #[arg(long, value_delimiter = ',', default_value = "pub,py-grid")]
    styles: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let color = !cli.no_color;
    match cli.cmd {
        Command::Styles => cmd_styles(),
        Command::Style { names } => cmd_style(&names),
        Command::Colors => cmd_colors(),
        Command::Table(args) => cmd_table(args),
        Command::Demo(args) => cmd_demo(args, color),
    }
}

fn cmd_styles() -> Result<()> {
    for name in Styles::builtin().names() {
        println!("{}", name);
    }
    Ok(())
}

fn cmd_style(names: &[String]) -> Result<()> {
    let merged = Styles::builtin().merge(names)?;
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}

fn cmd_colors() -> Result<()> {
    for entry in ColorRegistry::ALL {
        let c = entry.color();
        if c.a < 1.0 {
            println!("{:<20} {} alpha={}", entry.name(), c.to_hex(), c.a);
        } else {
            println!("{:<20} {}", entry.name(), c.to_hex());
        }
    }
    Ok(())
}

fn cmd_table(args: TableArgs) -> Result<()> {
    let table = Table::from_csv_path(&args.csv)?;
    let format = TableFormat {
        max_col_width: args.max_width,
        float_precision: args.precision,
    };
    println!("{}", format_statistics_table(&table, &format));
    Ok(())
}

fn cmd_demo(args: DemoArgs, color: bool) -> Result<()> {
    let config = match &args.config {
        Some(path) => LoggerConfig::from_path(path)?,
        None => LoggerConfig {
            directory: args.base.clone(),
            figures: args.figures,
            statistics: args.statistics,
            integrity: args.integrity,
            styles: args.styles.clone(),
            ..LoggerConfig::new(args.name.clone())
        },
    };
    let log = ScienceLogger::builder_from_config(&config)?
        .color(color)
        .build()?;
    log.head(&format!("lsu demo: {}", config.name));

    let (mut fig, grid) = fixed_size_subplots_with(2, 3, &SubplotLayout::default())?;
    let cmap = create_custom_colormap(ColorScheme::DEFAULTS, "demo")?;
    let colors = cmap.sample(grid.len());

    let mut summary = Table::new(["panel", "points", "mean", "max"]);
    for (i, id) in grid.iter().enumerate() {
        let freq = (i + 1) as f64;
        let points: Vec<(f64, f64)> = (0..=100)
            .map(|k| {
                let x = k as f64 / 100.0 * std::f64::consts::TAU;
                (x, (freq * x).sin())
            })
            .collect();
        let mean = points.iter().map(|p| p.1).sum::<f64>() / points.len() as f64;
        let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        summary.push_row([
            Cell::from(format!("sin({}x)", i + 1)),
            Cell::from(points.len()),
            Cell::from(mean),
            Cell::from(max),
        ]);

        let ax = fig.axes_mut(id);
        ax.set_title(format!("panel {}", i + 1));
        ax.plot(points).color(colors[i]).label(format!("f={}", i + 1));
    }

    log.subhead("Summary");
    log.stats(&summary);
    log.integrity(format!("{} panels rendered", grid.len()));

    match log.figure(&fig, "demo")? {
        Some(path) => eprintln!("Wrote figure to {}", path.display()),
        None => eprintln!("Figure not saved (figures below save)"),
    }
    Ok(())
}
