use clap::{Parser, ValueEnum};
use env_logger::Env;
use peek_line::{FirstLine, Index, IndexConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "peek-line", version, about = "Map a line in a combined file back to its source file")]
struct Args {
    /// Directory the pattern and a relative combined path are evaluated in
    workdir: PathBuf,

    /// Glob pattern selecting the source files that were combined
    pattern: String,

    /// Combined file
    combined: PathBuf,

    /// 1-based line number in the combined file to peek
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    line: u32,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Dump detected file boundaries as JSON to stderr (diagnostic)
    #[arg(long = "dump-boundaries", default_value_t = false)]
    dump_boundaries: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logger once; default level comes from RUST_LOG
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(""))
        .format_timestamp(None)
        .try_init();
    let args = Args::parse();

    let cfg = IndexConfig {
        workdir: args.workdir,
        pattern: args.pattern,
        combined: args.combined,
    };
    log::info!("peek: workdir={} pattern={} combined={} line={}", cfg.workdir.display(), cfg.pattern, cfg.combined.display(), args.line);

    let index = Index::build(&cfg, &FirstLine)?;
    if args.dump_boundaries {
        eprintln!("{}", serde_json::to_string_pretty(&index.boundaries.boundaries())?);
    }
    let loc = index.resolve(args.line)?;

    match args.format {
        OutputFormat::Text => println!("{}", loc),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&loc)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&loc)?),
    }
    Ok(())
}
