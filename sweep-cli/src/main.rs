mod app;
mod logging;
mod ui;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::bail;
use sweep_core::{ScanConfig, format_size};

use app::{AppState, Selection};
use ui::{confirm, render_clear_reports, render_sizes, render_tags, render_targets, render_top_files};

/// sweep - find and clear large, reclaimable cache directories
#[derive(Parser, Debug)]
#[command(name = "sweep")]
#[command(about = "Find and clear large, reclaimable cache directories")]
#[command(version)]
struct Args {
    /// Directory list (JSON); defaults to the user config file, then the bundled list
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Home directory used to expand `~` in the directory list
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List candidate directories
    List {
        /// Only show directories carrying this tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// List every tag in the directory list
    Tags,
    /// Scan the selected directories and report their sizes
    Scan {
        #[command(flatten)]
        selection: Selection,

        /// Number of largest files to show
        #[arg(long, default_value_t = 20)]
        top: usize,

        /// Walker threads per directory (0 = auto)
        #[arg(long, default_value_t = 0)]
        threads: usize,

        /// Include hidden files and directories
        #[arg(long)]
        hidden: bool,
    },
    /// Scan, then delete the contents of the selected directories
    Clean {
        #[command(flatten)]
        selection: Selection,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    logging::init_logger(args.verbose);

    let home = match args.home.clone().or_else(dirs::home_dir) {
        Some(home) => home,
        None => bail!("could not determine the home directory; pass --home"),
    };

    match args.command {
        Command::List { tags } => {
            let mut state = AppState::load(args.config.as_deref(), &home, ScanConfig::default());
            for tag in &tags {
                state.catalog.toggle_tag(tag);
            }
            print!("{}", render_targets(&state.catalog.filtered()));
        }
        Command::Tags => {
            let state = AppState::load(args.config.as_deref(), &home, ScanConfig::default());
            print!("{}", render_tags(&state.catalog));
        }
        Command::Scan {
            selection,
            top,
            threads,
            hidden,
        } => {
            let config = ScanConfig {
                num_threads: threads,
                skip_hidden: !hidden,
                ..Default::default()
            };
            let mut state = AppState::load(args.config.as_deref(), &home, config);
            state.apply_selection(&selection, &home)?;
            state.scan(&mut io::stderr())?;

            print!("{}", render_sizes(&state.catalog.selected(), &state.engine));
            println!();
            print!("{}", render_top_files(&state.engine.top_files(top)));
        }
        Command::Clean { selection, yes } => {
            let mut state = AppState::load(args.config.as_deref(), &home, ScanConfig::default());
            state.apply_selection(&selection, &home)?;
            state.scan(&mut io::stderr())?;

            print!("{}", render_sizes(&state.catalog.selected(), &state.engine));
            io::stdout().flush()?;

            let reclaimable = state.selected_size();
            let prompt = format!(
                "Delete the contents of {} director{} ({})?",
                state.catalog.selected().len(),
                if state.catalog.selected().len() == 1 { "y" } else { "ies" },
                format_size(reclaimable)
            );
            if !yes && !confirm(&prompt, &mut io::stdin().lock(), &mut io::stderr())? {
                eprintln!("Aborted.");
                return Ok(());
            }

            let reports = state.clear_selected()?;
            print!("{}", render_clear_reports(&reports));
        }
    }

    Ok(())
}
