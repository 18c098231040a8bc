//! slidedown - Main Entry Point
//!
//! Command-line front end: show, list, export, and edit the slides of a
//! markdown document, and list recently opened documents.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use slidedown::config::{load_config, save_config_silent, Settings, Theme};
use slidedown::export::{default_output_path, export_deck_to_file, ExportOptions};
use slidedown::files::{is_markdown_path, read_document, write_document};
use slidedown::{Presentation, Result};

/// Application name constant.
const APP_NAME: &str = "slidedown";

#[derive(Parser)]
#[command(name = "slidedown")]
#[command(version, about = "Markdown documents as slide decks", long_about = None)]
#[command(after_help = "EXAMPLES:
    slidedown show talk.md --slide 3     Print the HTML of slide 3
    slidedown list talk.md               List every slide
    slidedown export talk.md -o talk.html
    slidedown edit talk.md --slide 2 --delete
    slidedown recent                     List recently opened documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one slide
    Show {
        /// Markdown document (defaults to the configured document)
        document: Option<PathBuf>,

        /// 1-based slide number
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        slide: u64,

        /// Print the full slide view as JSON
        #[arg(long)]
        json: bool,

        /// Print the markdown source instead of HTML
        #[arg(long, conflicts_with = "json")]
        raw: bool,
    },

    /// List all slides with their first line
    List {
        document: Option<PathBuf>,
    },

    /// Write the whole deck as one HTML page
    Export {
        document: Option<PathBuf>,

        /// Output HTML file (defaults to <name>.html in the last export directory)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Override the configured theme
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,

        /// Leave out slide numbers and progress bars
        #[arg(long)]
        plain: bool,
    },

    /// Replace or delete one slide and save the document
    Edit {
        document: Option<PathBuf>,

        /// 1-based slide number
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        slide: u64,

        /// New markdown for the slide
        #[arg(long, required_unless_present = "delete")]
        content: Option<String>,

        /// Delete the slide instead
        #[arg(long, conflicts_with = "content")]
        delete: bool,
    },

    /// List recently opened documents, newest first
    Recent,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut settings = load_config();
    info!("Starting {}", APP_NAME);

    match run(cli.command, &mut settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, settings: &mut Settings) -> Result<()> {
    match command {
        Command::Show {
            document,
            slide,
            json,
            raw,
        } => {
            let (mut deck, _) = open_deck(document, settings)?;
            let view = deck.go_to_slide(slide_number(slide))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else if raw {
                println!("{}", view.raw_content);
            } else {
                println!("{}", view.html);
            }
        }

        Command::List { document } => {
            let (deck, path) = open_deck(document, settings)?;
            println!("{} ({} slides)", path.display(), deck.total_slides());
            for (index, slide) in deck.slides().iter().enumerate() {
                let first_line = slide.raw_content().lines().next().unwrap_or("");
                println!("{:>4}  {}", index + 1, first_line);
            }
        }

        Command::Export {
            document,
            output,
            theme,
            plain,
        } => {
            let (deck, path) = open_deck(document, settings)?;
            let output = output.unwrap_or_else(|| default_output_path(&path, &settings.export));
            let theme = theme.map(Theme::from).unwrap_or(settings.theme);
            let options = if plain {
                ExportOptions {
                    custom_css: settings.export.custom_css.clone(),
                    max_image_height_vh: settings.export.max_image_height_vh,
                    ..ExportOptions::plain()
                }
            } else {
                settings.export.clone()
            };
            export_deck_to_file(&deck, &output, theme, &options)?;

            let recorded_dir = output
                .parent()
                .filter(|d| !d.as_os_str().is_empty() && *d != Path::new("."));
            if let Some(dir) = recorded_dir {
                if settings.export.last_export_directory.as_deref() != Some(dir) {
                    settings.export.last_export_directory = Some(dir.to_path_buf());
                    save_config_silent(settings);
                }
            }
            println!("Exported {} slides to {}", deck.total_slides(), output.display());
        }

        Command::Edit {
            document,
            slide,
            content,
            delete,
        } => {
            let (mut deck, path) = open_deck(document, settings)?;
            deck.go_to_slide(slide_number(slide))?;

            if delete {
                match deck.delete_current()? {
                    Some(view) => println!("Deleted slide; now on {}", view.position_label()),
                    None => warn!("Deleted the only slide; the document is now empty"),
                }
            } else if let Some(markdown) = content {
                let view = deck.set_current_raw_content(markdown)?;
                println!("Updated slide {}", view.position_label());
            }

            write_document(&path, &deck.to_markdown())?;
        }

        Command::Recent => {
            if settings.recent_documents.is_empty() {
                println!("No recent documents");
            }
            for path in &settings.recent_documents {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

/// Read and split the named document, or the configured default.
fn open_deck(document: Option<PathBuf>, settings: &mut Settings) -> Result<(Presentation, PathBuf)> {
    let path = document.unwrap_or_else(|| settings.default_document.clone());
    warn_if_not_markdown(&path);

    let text = read_document(&path)?;
    let deck = Presentation::new(&text);

    if settings.add_recent_document(path.clone()) {
        save_config_silent(settings);
    }

    Ok((deck, path))
}

/// Slide numbers too large for `usize` can only be out of range.
fn slide_number(slide: u64) -> usize {
    usize::try_from(slide).unwrap_or(usize::MAX)
}

fn warn_if_not_markdown(path: &Path) {
    if !is_markdown_path(path) {
        warn!(
            "{} does not have a markdown extension; reading it anyway",
            path.display()
        );
    }
}
