use clap::Parser;
use logseq_hugo_conv::cli::{run_export, ExportOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Convert the public pages of a Logseq graph to Hugo content.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Logseq graph root folder (containing pages/ and assets/)
    #[arg(long, value_name = "DIR")]
    graph: PathBuf,

    /// Hugo content/ folder; its parent is treated as the Hugo site folder
    #[arg(long, value_name = "DIR")]
    output: PathBuf,

    /// Engine config (sections, internal keys, theme params, colors)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Personal site config (languages, hugo, hosting)
    #[arg(long, value_name = "FILE")]
    site: Option<PathBuf>,

    /// Remove the output folder before export
    #[arg(long)]
    clean: bool,

    /// Language used for pages without a lang:: property (overrides the engine config)
    #[arg(long, value_name = "CODE")]
    default_lang: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let options = ExportOptions {
        graph: cli.graph,
        output: cli.output,
        config: cli.config,
        site: cli.site,
        clean: cli.clean,
        default_lang: cli.default_lang,
    };
    run_export(&options)?;

    Ok(())
}
