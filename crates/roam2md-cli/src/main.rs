use anyhow::{Context, Result};
use clap::Parser;
use roam2md_config::Config;
use roam2md_engine::{
    Conversion, ConvertOptions, Export, OutputLayout, RenderedPage, WriteReport, convert, io,
    load_export, write_pages,
};
use std::{path::PathBuf, process};

#[derive(Parser)]
#[command(
    name = "roam2md",
    version,
    about = "Convert a Roam Research JSON export into Markdown pages"
)]
struct Cli {
    /// Roam JSON export file
    export: PathBuf,

    /// Output directory (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file to use instead of ~/.config/roam2md/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print pages to stdout instead of writing files
    #[arg(long)]
    dry_run: bool,

    /// Log more detail (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Config file values with command-line overrides applied.
    fn settings(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_path(path)?
                .with_context(|| format!("config file {} not found", path.display()))?,
            None => Config::load()?.unwrap_or_default(),
        };
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level())
        .init();

    let config = cli.settings()?;
    log::debug!("using {config:?}");

    let export = load_export(&cli.export)
        .with_context(|| format!("could not load {}", cli.export.display()))?;
    let conversion = convert(
        &export.pages,
        ConvertOptions {
            max_depth: config.max_depth,
        },
    );
    let failed_renders = !conversion.failures.is_empty();
    report_conversion(&export, &conversion);

    let layout = OutputLayout {
        daily_dir: config.daily_dir.clone(),
        weekly_dir: config.weekly_dir.clone(),
    };

    if cli.dry_run {
        for page in &conversion.pages {
            print_page(page, &layout);
        }
        if failed_renders {
            process::exit(1);
        }
        return Ok(());
    }

    let report = write_pages(conversion.pages, &config.output_dir, &layout);
    report_writes(&report);

    if failed_renders || !report.failures.is_empty() {
        process::exit(1);
    }
    log::info!("Done!");
    Ok(())
}

fn print_page(page: &RenderedPage, layout: &OutputLayout) {
    println!("==> {} <==", io::destination(page, layout));
    println!("{}", io::page_contents(page));
    println!();
}

fn report_conversion(export: &Export, conversion: &Conversion) {
    for (page, reason) in export.rejected() {
        eprintln!("skipped page {:?}: {reason}", page.title);
    }
    for uid in &conversion.duplicates {
        eprintln!("block uid {uid} appears more than once; the last copy was used");
    }
    if !conversion.failures.is_empty() {
        eprintln!("The following pages could not be rendered:");
        for failure in &conversion.failures {
            eprintln!("    {failure}");
        }
    }
    if !conversion.unresolved.is_empty() {
        eprintln!(
            "{} markers could not be resolved (see warnings above)",
            conversion.unresolved.len()
        );
    }
}

fn report_writes(report: &WriteReport) {
    if report.failures.is_empty() {
        return;
    }
    eprintln!("The following pages had errors:");
    for failure in &report.failures {
        eprintln!("{}", failure.error);
        eprint!("{failure}");
    }
}
