use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use arbor::browser::{self, LoadOptions};
use arbor::core::config::{self, CliOverrides, ConfigSource};
use arbor::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "arbor", about = "Keyboard-driven tree view file browser")]
struct Args {
    /// Directory to browse (defaults to the current directory)
    root: Option<PathBuf>,

    /// Show dotfiles
    #[arg(short = 'a', long)]
    show_hidden: bool,

    /// Where to write the log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the top level as plain text and exit
    #[arg(short, long)]
    print: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, source) = config::load_config().map_err(std::io::Error::other)?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            root: args.root,
            show_hidden: args.show_hidden.then_some(true),
            log_file: args.log_file,
        },
    );

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(
            config::level_filter(&resolved.log_level),
            log_config,
            log_file,
        );
    }

    // Config is read before the logger exists; report what happened now.
    match &source {
        ConfigSource::GenerateFailed(..) | ConfigSource::NoHome => log::warn!("{source}"),
        _ => log::info!("{source}"),
    }
    for warning in &resolved.warnings {
        log::warn!("{warning}");
    }
    log::debug!("Config: {:?}", file_config);

    log::info!("Arbor starting up in {}", resolved.root.display());

    if args.print {
        let options = Arc::new(LoadOptions {
            root: resolved.root.clone(),
            show_hidden: resolved.show_hidden,
            dirs_first: resolved.dirs_first,
        });
        let width = crossterm::terminal::size().map_or(80, |(w, _)| w);
        println!("{}", browser::listing(&options, &resolved.symbols, width)?);
        return Ok(());
    }

    tui::run(resolved)
}
