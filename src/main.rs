use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use benchplot::reports::{self, AlignmentRequest, CompareRequest, SteadyStateRequest, VarianceRequest};
use benchplot::Config;
use benchplot_core::ReportInterval;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "benchplot", version, about = "Charts from sysbench and fio benchmark output")]
struct Cli {
    /// Log at debug level regardless of RUST_LOG.
    #[arg(long, global = true)]
    debug: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Use this config file instead of ~/.config/benchplot/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Chart theme (see `compare --list-themes`).
    #[arg(long, global = true)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Plot TPS over time from one sysbench log.
    Tps {
        /// sysbench output, or `-` for stdin.
        file: PathBuf,
        #[arg(long, short, default_value = reports::compare::TPS_OUTPUT)]
        output: PathBuf,
    },
    /// Compare TPS over time across several sysbench logs.
    Compare(CompareArgs),
    /// TPS distribution statistics and charts for one or two logs.
    Variance(VarianceArgs),
    /// fio steady-state IOPS and bandwidth, optionally against a second run.
    SteadyState(SteadyStateArgs),
    /// IO block-size and alignment histograms from blkalgn JSON output.
    Alignment(AlignmentArgs),
}

#[derive(Args)]
struct CompareArgs {
    /// sysbench output files.
    #[arg(required_unless_present = "list_themes")]
    files: Vec<PathBuf>,
    /// Legend per file, in file order. Defaults to the file stems.
    #[arg(long, num_args = 1..)]
    legends: Vec<String>,
    #[arg(long, default_value = "Transactions Per Second (TPS) Over Time")]
    title: String,
    #[arg(long, default_value = "TPS")]
    ylabel: String,
    #[arg(long, short, default_value = "a_vs_b.svg")]
    output: PathBuf,
    /// Seconds between two sysbench report lines.
    #[arg(long, default_value = "1", value_parser = parse_interval)]
    report_interval: ReportInterval,
    /// Print the available themes and exit.
    #[arg(long)]
    list_themes: bool,
}

#[derive(Args)]
struct VarianceArgs {
    file1: PathBuf,
    legend1: String,
    file2: Option<PathBuf>,
    /// Legend of the second file. Defaults to its file stem.
    legend2: Option<String>,
    /// Colour of the first dataset. Defaults to `[variance] color1`.
    #[arg(long)]
    color1: Option<String>,
    /// Colour of the second dataset. Defaults to `[variance] color2`.
    #[arg(long)]
    color2: Option<String>,
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Args)]
struct SteadyStateArgs {
    /// Directory with ss_iops.json and/or ss_bw.json.
    dir: PathBuf,
    /// Second results directory to draw underneath in drifted colours.
    #[arg(long)]
    compare: Option<PathBuf>,
    #[arg(long, default_value = "")]
    title_prefix: String,
    /// Upper limit of the IOPS axis.
    #[arg(long)]
    iops_max: Option<f64>,
    /// Upper limit of the bandwidth axis, e.g. `1.8GB/s`.
    #[arg(long)]
    bw_max: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    red_drift: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    green_drift: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    blue_drift: Option<i32>,
    /// Animate the comparison: the second directory first, then this one.
    #[arg(long, requires = "compare")]
    animate: bool,
    #[arg(long, short, default_value = reports::steady_state::STEADY_STATE_OUTPUT)]
    output: PathBuf,
}

#[derive(Args)]
struct AlignmentArgs {
    /// One to six histogram JSON files.
    #[arg(num_args = 1..=6, required = true)]
    inputs: Vec<PathBuf>,
    /// Legend per input, repeated in input order. Defaults to the file stems.
    #[arg(long = "legend")]
    legends: Vec<String>,
    /// Colour per input, repeated in input order.
    #[arg(long = "color")]
    colors: Vec<String>,
    /// Draw 3D bars, one row per input.
    #[arg(long = "3d")]
    three_d: bool,
    #[arg(long, short, default_value = reports::alignment::ALIGNMENT_OUTPUT)]
    output: PathBuf,
    /// Also export both histograms as `<PREFIX>_io_block_size.csv` and
    /// `<PREFIX>_alignment.csv`.
    #[arg(long)]
    csv_prefix: Option<String>,
}

fn parse_interval(s: &str) -> Result<ReportInterval, String> {
    let seconds: u64 = s.parse().map_err(|e| format!("{e}"))?;
    ReportInterval::new(seconds).map_err(|e| e.to_string())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path).with_context(|| format!("loading config {}", path.display())),
        None => Config::load().context("loading config"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    let config = load_config(&cli)?;
    let theme = cli.theme.clone();

    match cli.command {
        Command::Tps { file, output } => {
            reports::tps(&config, &file, &output, theme.as_deref())?;
            println!("wrote {}", output.display());
        }
        Command::Compare(args) => {
            if args.list_themes {
                for name in benchplot_render::list_themes() {
                    println!("{name}");
                }
                return Ok(());
            }
            let req = CompareRequest {
                files: args.files,
                legends: args.legends,
                title: args.title,
                y_label: args.ylabel,
                output: args.output,
                theme,
                interval: args.report_interval,
            };
            reports::compare(&config, &req)?;
            println!("wrote {}", req.output.display());
        }
        Command::Variance(args) => {
            let mut inputs = vec![(args.file1, Some(args.legend1))];
            if let Some(file) = args.file2 {
                inputs.push((file, args.legend2));
            }
            let req = VarianceRequest {
                inputs,
                color1: args.color1,
                color2: args.color2,
                output_dir: args.output_dir,
                theme,
            };
            for summary in reports::variance(&config, &req)? {
                println!("{}", summary.report());
            }
        }
        Command::SteadyState(args) => {
            let req = SteadyStateRequest {
                dir: args.dir,
                compare: args.compare,
                title_prefix: args.title_prefix,
                iops_max: args.iops_max,
                bw_max: args.bw_max,
                red_drift: args.red_drift,
                green_drift: args.green_drift,
                blue_drift: args.blue_drift,
                animate: args.animate,
                output: args.output,
                theme,
            };
            let report = reports::steady_state(&config, &req)?;
            println!("wrote {} ({})", req.output.display(), report.unit.label());
        }
        Command::Alignment(args) => {
            let req = AlignmentRequest {
                inputs: args.inputs,
                legends: args.legends,
                colors: args.colors,
                three_d: args.three_d,
                output: args.output,
                csv_prefix: args.csv_prefix,
                theme,
            };
            for path in reports::alignment(&config, &req)? {
                println!("wrote {}", path.display());
            }
        }
    }
    Ok(())
}
