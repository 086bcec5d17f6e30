use std::path::Path;

use clap::Parser;
use eyre::{Result, eyre};

use deckforge_app::cli::{Cli, Commands};
use deckforge_app::commands;
use deckforge_app::config::{self, API_KEY_ENV, DeckforgeConfig};
use deckforge_app::shell::Shell;
use deckforge_app::state::DeckSession;
use deckforge_export::images::HttpImageSource;
use deckforge_export::render::SlideRenderer;
use deckforge_gemini::client::{GeminiClient, TextGenerator};
use deckforge_gemini::error::GeminiError;

/// Stands in for the client when no API key is configured, so saved decks
/// can still be edited and exported.
struct MissingKey;

impl TextGenerator for MissingKey {
    fn generate_text(&self, _prompt: &str) -> Result<String, GeminiError> {
        Err(GeminiError::Config(format!(
            "no API key; set {API_KEY_ENV} or run `deckforge config --api-key <key>`"
        )))
    }
}

fn generator(config: &DeckforgeConfig) -> Result<Box<dyn TextGenerator>> {
    if config.api_key.trim().is_empty() {
        return Ok(Box::new(MissingKey));
    }
    Ok(Box::new(GeminiClient::new(config.gemini_settings())?))
}

fn export_deck(session: &mut DeckSession, config: &DeckforgeConfig, out: &Path) -> Result<()> {
    let images = HttpImageSource::new(config.timeout());
    let report = commands::export(session, out, &config.theme(), &images).map_err(|e| eyre!(e))?;
    println!(
        "wrote {} ({} slides, {} images)",
        out.display(),
        report.slides,
        report.images_embedded
    );
    for url in &report.images_skipped {
        println!("  skipped image {url}");
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = config::load_config()?;
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }

    match cli.command.unwrap_or(Commands::Shell { deck: None }) {
        Commands::Generate {
            topic,
            out,
            save_json,
        } => {
            let mut session = DeckSession::new();
            let count = commands::generate(&mut session, generator(&config)?.as_ref(), &topic)
                .map_err(|e| eyre!(e))?;
            println!("generated {count} slides");

            if let Some(path) = save_json {
                commands::save_json(&session, &path).map_err(|e| eyre!(e))?;
            }
            let out = out.unwrap_or_else(|| config.output_file.clone());
            export_deck(&mut session, &config, &out)?;
        }
        Commands::Preview { deck } => {
            let session = DeckSession::from_slides(commands::load_json(&deck).map_err(|e| eyre!(e))?);
            let renderer = SlideRenderer::new()?;
            println!("{}", commands::preview(&session, &renderer).map_err(|e| eyre!(e))?);
        }
        Commands::Export { deck, out } => {
            let mut session =
                DeckSession::from_slides(commands::load_json(&deck).map_err(|e| eyre!(e))?);
            let out = out.unwrap_or_else(|| config.output_file.clone());
            export_deck(&mut session, &config, &out)?;
        }
        Commands::Shell { deck } => {
            let session = match deck {
                Some(path) => DeckSession::from_slides(commands::load_json(&path).map_err(|e| eyre!(e))?),
                None => DeckSession::new(),
            };
            let mut shell = Shell::new(
                session,
                generator(&config)?,
                Box::new(HttpImageSource::new(config.timeout())),
                SlideRenderer::new()?,
                config.theme(),
                config.output_file.clone(),
            );
            println!("deckforge shell, type `help` for commands");
            shell.run(std::io::stdin().lock(), std::io::stdout())?;
        }
        Commands::Config {
            api_key,
            endpoint,
            timeout_secs,
            output_file,
            background_color,
        } => {
            // Work on the stored file; the env override is not persisted.
            let path = config::config_path()?;
            let mut stored = config::load_config_from(&path)?;
            let mut changed = false;

            if let Some(model) = cli.model {
                stored.model = model;
                changed = true;
            }
            if let Some(key) = api_key {
                stored.api_key = key;
                changed = true;
            }
            if let Some(endpoint) = endpoint {
                stored.endpoint = endpoint;
                changed = true;
            }
            if let Some(secs) = timeout_secs {
                stored.timeout_secs = secs;
                changed = true;
            }
            if let Some(file) = output_file {
                stored.output_file = file;
                changed = true;
            }
            if let Some(color) = background_color {
                stored.background_color = deckforge_core::models::style::normalize_color(&color)?;
                changed = true;
            }

            if changed {
                config::save_config(&stored)?;
            }
            let info = config::config_info(&stored, &path);
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}
