use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "deckforge")]
#[command(about = "Generate, edit and export slide decks with Gemini")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the configured model (e.g. gemini-1.5-flash)
    #[arg(long, global = true)]
    pub model: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a deck for a topic and export it
    Generate {
        /// Presentation topic
        topic: String,
        /// Output .pptx file (defaults to the configured output file)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Also save the generated deck as JSON
        #[arg(long)]
        save_json: Option<PathBuf>,
    },
    /// Preview a saved deck in the terminal
    Preview {
        /// Deck saved as JSON
        deck: PathBuf,
    },
    /// Export a saved deck to .pptx
    Export {
        /// Deck saved as JSON
        deck: PathBuf,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Interactive generation and editing session
    Shell {
        /// Start from a deck saved as JSON
        #[arg(long)]
        deck: Option<PathBuf>,
    },
    /// Show or update the stored configuration
    Config {
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        timeout_secs: Option<u64>,
        #[arg(long)]
        output_file: Option<PathBuf>,
        /// Slide background as RRGGBB
        #[arg(long)]
        background_color: Option<String>,
    },
}
