use anyhow::Result;
use clap::Parser;
use phyta_core::metrics::init_logging;
use phyta_core::{NullSink, PresentationSink};
use phyta_lib::app::{load_config, App};
use phyta_lib::sink::{JsonLinesSink, LogSink};
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path; defaults are used when it does not exist
    #[arg(short, long, default_value = "phyta.toml")]
    config: PathBuf,

    /// Override the configured tick limit
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Override the configured seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where world events go
    #[arg(short, long, value_enum, default_value = "log")]
    output: Output,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Output {
    /// Events as debug log lines
    Log,
    /// Events as JSON lines on stdout
    Jsonl,
    /// No event output
    Quiet,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    let max_ticks = args.ticks.unwrap_or(config.driver.max_ticks);

    let mut app = App::new(config)?;
    let mut sink: Box<dyn PresentationSink> = match args.output {
        Output::Log => Box::new(LogSink),
        Output::Jsonl => Box::new(JsonLinesSink::new(BufWriter::new(std::io::stdout().lock()))),
        Output::Quiet => Box::new(NullSink),
    };

    let summary = app.run(max_ticks, sink.as_mut());
    drop(sink);

    eprintln!(
        "Finished after {} ticks ({:?}): population {}, peak {}, births {}, deaths {}, culls {}, crowded {}",
        summary.ticks,
        summary.reason,
        summary.population,
        summary.peak_population,
        summary.births,
        summary.deaths,
        summary.culls,
        summary.placement_failures,
    );
    eprintln!("Config fingerprint: {}", summary.fingerprint);
    Ok(())
}
