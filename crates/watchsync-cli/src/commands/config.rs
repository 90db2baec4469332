use crate::app::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use watchsync_config::{normalize_region, ConfigError, ConfigStore, SyncConfig};

/// Field changes requested on the command line
#[derive(Debug, Default)]
pub struct ConfigUpdate {
    pub list_url: Option<String>,
    pub plex_token: Option<String>,
    pub tmdb_api_key: Option<String>,
    pub region: Option<String>,
    pub providers: Option<Vec<u32>>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.list_url.is_none()
            && self.plex_token.is_none()
            && self.tmdb_api_key.is_none()
            && self.region.is_none()
            && self.providers.is_none()
    }

    /// The full record to write back
    fn apply(self, mut config: SyncConfig) -> Result<SyncConfig, ConfigError> {
        if let Some(url) = self.list_url {
            config.source_list_url = url.trim().to_string();
        }
        if let Some(token) = self.plex_token {
            config.remote_auth_token = token.trim().to_string();
        }
        if let Some(key) = self.tmdb_api_key {
            config.catalog_api_key = key.trim().to_string();
        }
        if let Some(region) = self.region {
            config.region = normalize_region(&region)?;
        }
        if let Some(providers) = self.providers {
            config.allowed_provider_ids = providers.into_iter().collect();
        }
        Ok(config)
    }
}

pub fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output),
        crate::ConfigCommands::Set {
            list_url,
            plex_token,
            tmdb_api_key,
            region,
            providers,
        } => {
            let update = ConfigUpdate {
                list_url,
                plex_token,
                tmdb_api_key,
                region,
                providers,
            };
            set_config(update, output)
        }
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::open()?;
    let config = ctx
        .config_store
        .load()
        .map_err(|e| eyre!("Failed to load config from {}: {}", ctx.config_store.path().display(), e))?;
    let config = if full { config } else { config.masked() };

    if !output.is_human() {
        output.json(&serde_json::to_value(&config)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(ctx.config_store.path().display().to_string()),
    ]);
    let providers = config
        .allowed_provider_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    for (name, value) in [
        ("IMDb list URL", config.source_list_url.as_str()),
        ("Plex token", config.remote_auth_token.as_str()),
        ("TMDB API key", config.catalog_api_key.as_str()),
        ("Region", config.region.as_str()),
        ("Provider ids", providers.as_str()),
    ] {
        let value = if value.is_empty() {
            "not set".bright_black().to_string()
        } else {
            value.to_string()
        };
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);

    let missing = config.missing_required();
    if !missing.is_empty() {
        output.warn(format!("Sync will not run until these are set: {}", missing.join(", ")));
    }
    Ok(())
}

fn set_config(update: ConfigUpdate, output: &Output) -> Result<()> {
    if update.is_empty() {
        output.warn("Nothing to change. Pass at least one of --list-url, --plex-token, --tmdb-api-key, --region, --providers");
        return Ok(());
    }

    let ctx = AppContext::open()?;
    let current = ctx
        .config_store
        .load()
        .map_err(|e| eyre!("Failed to load config from {}: {}", ctx.config_store.path().display(), e))?;
    let updated = update.apply(current)?;
    ctx.config_store
        .save(&updated)
        .map_err(|e| eyre!("Failed to save config to {}: {}", ctx.config_store.path().display(), e))?;
    ctx.log.success("Configuration updated");

    output.success(format!("Configuration saved to {}", ctx.config_store.path().display()));
    Ok(())
}
