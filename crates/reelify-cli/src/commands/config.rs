use super::context::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use reelify_config::{Config, CredentialStore, PathManager};
use serde_json::json;

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output),
        crate::ConfigCommands::SetApiKey { key } => set_api_key(key, output),
        crate::ConfigCommands::Init { force } => init_config(force, output),
    }
}

/// Shows the file as loaded; a failed validation is reported, not fatal
fn show_config(full: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::load_unvalidated()?;
    if let Err(e) = ctx.config.validate() {
        output.warn(format!("Invalid config: {}", e));
    }
    let config_file = ctx.paths.config_file();
    let api_key = ctx.credentials.resolve_tmdb_api_key();
    let key_display = match &api_key {
        Some(key) if full => key.clone(),
        Some(key) => mask_string(key),
        None => "<not set>".to_string(),
    };
    let tmdb = &ctx.config.tmdb;

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("{}", "Configuration".bright_cyan().bold());
            if !config_file.exists() {
                println!("{}", format!("(defaults, no file at {})", config_file.display()).dimmed());
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
            ]);
            table.add_row(vec!["Config file".to_string(), config_file.display().to_string()]);
            table.add_row(vec!["Collection".to_string(), ctx.paths.collection_dir().display().to_string()]);
            table.add_row(vec!["TMDB API key".to_string(), key_display]);
            table.add_row(vec!["tmdb.base_url".to_string(), tmdb.base_url.clone()]);
            table.add_row(vec!["tmdb.image_base_url".to_string(), tmdb.image_base_url.clone()]);
            table.add_row(vec!["tmdb.language".to_string(), tmdb.language.clone()]);
            table.add_row(vec!["tmdb.region".to_string(), tmdb.region.clone()]);
            table.add_row(vec!["tmdb.timeout_secs".to_string(), tmdb.timeout_secs.to_string()]);
            table.add_row(vec!["chat.reply_delay_ms".to_string(), ctx.config.chat.reply_delay_ms.to_string()]);
            table.add_row(vec![
                "logging.file".to_string(),
                ctx.config
                    .logging
                    .file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<stderr>".to_string()),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.render(
                String::new,
                &json!({
                    "config_file": config_file,
                    "collection_dir": ctx.paths.collection_dir(),
                    "tmdb_api_key": key_display,
                    "config": ctx.config,
                }),
            );
        }
    }
    Ok(())
}

fn set_api_key(key: Option<String>, output: &Output) -> Result<()> {
    let paths = PathManager::default();

    let key = match key {
        Some(key) => key,
        None => dialoguer::Password::new()
            .with_prompt("TMDB API key")
            .interact()
            .map_err(|e| eyre!("Failed to read API key: {}", e))?,
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    let mut store = CredentialStore::new(paths.credentials_file());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    store.set_tmdb_api_key(key);
    store
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    tracing::info!(path = %paths.credentials_file().display(), "Stored TMDB API key");
    output.success(format!("TMDB API key saved to {}", paths.credentials_file().display()));
    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();

    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(());
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
