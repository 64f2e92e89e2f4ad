use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use texatlas_core::config::{FitHeuristic, SplitRule};
use texatlas_core::{PackOutput, PackSession, PackerConfig, RectRequest};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "texatlas",
    about = "Pack rectangles into atlas pages",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack a request manifest (JSON or YAML list of {id, width, height, padding?})
    Pack(PackArgs),
    /// Pack random rectangles and print timing + occupancy
    Bench(BenchArgs),
}

#[derive(Args, Debug, Clone)]
struct LayoutArgs {
    /// Side of a freshly opened page
    #[arg(long, default_value_t = 256, help_heading = "Layout")]
    default_page_size: u32,
    /// Largest allowed page side
    #[arg(long, default_value_t = 4096, help_heading = "Layout")]
    max_page_size: u32,
    /// Round page sides up to a power of two
    #[arg(long, default_value_t = true, action=ArgAction::Set, help_heading = "Layout")]
    pow2: bool,
    /// Padding on all sides of requests without their own padding
    #[arg(long, default_value_t = 0, help_heading = "Layout")]
    padding: u32,
    /// Region heuristic: baf|bssf|blsf|bl
    #[arg(long, default_value = "baf", help_heading = "Heuristics")]
    heuristic: String,
    /// Split rule: bottom|right|slas
    #[arg(long, default_value = "bottom", help_heading = "Heuristics")]
    split: String,
    /// YAML config file path (overrides the options above)
    #[arg(long, help_heading = "Config")]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    /// Request manifest (.json, .yaml or .yml)
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Write the layout JSON here instead of stdout
    #[arg(short, long, help_heading = "Input/Output")]
    out: Option<PathBuf>,
    /// Print a stats summary to stderr after packing
    #[arg(long, default_value_t = false, help_heading = "Input/Output")]
    stats: bool,
    /// Print the effective config and exit
    #[arg(long, default_value_t = false, help_heading = "Config")]
    print_config: bool,
    /// Format for --print-config: json|yaml
    #[arg(long, default_value = "json", help_heading = "Config")]
    print_config_format: String,
    #[command(flatten)]
    layout: LayoutArgs,
}

#[derive(Parser, Debug, Clone)]
struct BenchArgs {
    /// Rectangles per atlas
    #[arg(long, default_value_t = 500)]
    count: usize,
    /// Smallest random side
    #[arg(long, default_value_t = 4)]
    min_size: u32,
    /// Largest random side
    #[arg(long, default_value_t = 64)]
    max_size: u32,
    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Independent atlases to pack
    #[arg(long, default_value_t = 1)]
    batches: usize,
    /// Pack batches in parallel (requires core feature `parallel`)
    #[arg(long, default_value_t = false)]
    parallel: bool,
    #[command(flatten)]
    layout: LayoutArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args),
        Commands::Bench(args) => run_bench(args),
    }
}

fn run_pack(cli: &PackArgs) -> anyhow::Result<()> {
    let cfg = build_config(&cli.layout)?;

    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    let requests = load_manifest(&cli.input)?;
    info!(count = requests.len(), "loaded requests");

    let start = Instant::now();
    let session = PackSession::new(cfg)?;
    let out = session
        .pack(requests)
        .with_context(|| format!("pack {}", cli.input.display()))?;
    let elapsed = start.elapsed();
    info!(
        pages = out.pages.len(),
        placements = out.placements.len(),
        elapsed = %fmt_dur(elapsed),
        "packed"
    );

    let json = serde_json::to_string_pretty(&out)?;
    match &cli.out {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            info!(?path, "layout written");
        }
        None => println!("{json}"),
    }

    if cli.stats {
        eprintln!("{}", out.stats().summary());
    }
    Ok(())
}

fn run_bench(b: &BenchArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        b.min_size > 0 && b.min_size <= b.max_size,
        "invalid size range {}..={}",
        b.min_size,
        b.max_size
    );
    let mut cfg = build_config(&b.layout)?;
    cfg.parallel = b.parallel;
    let session = PackSession::new(cfg)?;
    if b.parallel && !session.runs_parallel() {
        warn!("--parallel needs the `parallel` feature; timing a sequential run");
    }
    let mode = if session.runs_parallel() {
        "parallel"
    } else {
        "sequential"
    };

    let mut rng = rand::rngs::StdRng::seed_from_u64(b.seed);
    let batches: Vec<Vec<RectRequest<String>>> = (0..b.batches)
        .map(|batch| {
            (0..b.count)
                .map(|i| {
                    let w = rng.gen_range(b.min_size..=b.max_size);
                    let h = rng.gen_range(b.min_size..=b.max_size);
                    RectRequest::new(format!("b{batch}_r{i}"), w, h)
                })
                .collect()
        })
        .collect();

    let start = Instant::now();
    let results = session.pack_many(batches);
    let elapsed = start.elapsed();

    let outputs: Vec<PackOutput<String>> = results.into_iter().collect::<Result<_, _>>()?;
    for (i, out) in outputs.iter().enumerate() {
        debug!(batch = i, pages = out.pages.len(), "batch packed");
    }
    let (used, total) = outputs.iter().fold((0u64, 0u64), |(u, t), out| {
        let s = out.stats();
        (u + s.used_area, t + s.total_page_area)
    });
    let occupancy = if total > 0 {
        used as f64 / total as f64
    } else {
        0.0
    };
    let pages: usize = outputs.iter().map(|o| o.pages.len()).sum();
    println!(
        "mode={} batches={} rects/batch={} pages={} time={} occupancy={:.2}%",
        mode,
        b.batches,
        b.count,
        pages,
        fmt_dur(elapsed),
        occupancy * 100.0
    );
    Ok(())
}

fn fmt_dur(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else {
        format!("{:.3}ms", d.as_secs_f64() * 1000.0)
    }
}

fn build_config(args: &LayoutArgs) -> anyhow::Result<PackerConfig> {
    let base = PackerConfig {
        default_page_size: args.default_page_size,
        max_page_size: args.max_page_size,
        page_size_is_power_of_two: args.pow2,
        default_padding: args.padding,
        heuristic: args
            .heuristic
            .parse::<FitHeuristic>()
            .map_err(anyhow::Error::msg)?,
        split: args.split.parse::<SplitRule>().map_err(anyhow::Error::msg)?,
        parallel: false,
    };
    // Config file sets options en bloc on top of the flags
    let cfg = if let Some(path) = &args.config {
        let file =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse {}", path.display()))?;
        y.into_packer_config(base)?
    } else {
        base
    };
    cfg.validate()?;
    Ok(cfg)
}

fn load_manifest(path: &Path) -> anyhow::Result<Vec<RectRequest<String>>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let requests = match ext.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("parse {}", path.display()))?,
        _ => serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?,
    };
    Ok(requests)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    default_page_size: Option<u32>,
    max_page_size: Option<u32>,
    page_size_is_power_of_two: Option<bool>,
    default_padding: Option<u32>,
    heuristic: Option<String>,
    split: Option<String>,
}

impl YamlConfig {
    fn into_packer_config(self, mut cfg: PackerConfig) -> anyhow::Result<PackerConfig> {
        if let Some(v) = self.default_page_size {
            cfg.default_page_size = v;
        }
        if let Some(v) = self.max_page_size {
            cfg.max_page_size = v;
        }
        if let Some(v) = self.page_size_is_power_of_two {
            cfg.page_size_is_power_of_two = v;
        }
        if let Some(v) = self.default_padding {
            cfg.default_padding = v;
        }
        if let Some(v) = self.heuristic {
            cfg.heuristic = v.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(v) = self.split {
            cfg.split = v.parse().map_err(anyhow::Error::msg)?;
        }
        Ok(cfg)
    }
}
