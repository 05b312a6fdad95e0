use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use reelify_config::{Config, CredentialStore, PathManager};
use reelify_core::{Catalog, CollectionStore, Discovery, JsonFileBackend, Normalizer};
use reelify_sources::TmdbClient;

/// Everything a command needs, loaded once per invocation
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub credentials: CredentialStore,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        Self::load_from(PathManager::default(), true)
    }

    /// Parse the config without checking its values
    pub fn load_unvalidated() -> Result<Self> {
        Self::load_from(PathManager::default(), false)
    }

    fn load_from(paths: PathManager, validate: bool) -> Result<Self> {
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        if validate {
            config
                .validate()
                .map_err(|e| eyre!("Invalid config in {}: {}", config_file.display(), e))?;
        }

        let mut credentials = CredentialStore::new(paths.credentials_file());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

        Ok(Self {
            paths,
            config,
            credentials,
        })
    }

    /// Without an API key every remote read fails and the built-in catalog
    /// is shown instead.
    pub fn discovery(&self, output: &Output) -> Discovery<TmdbClient> {
        let api_key = self.credentials.resolve_tmdb_api_key().unwrap_or_else(|| {
            output.warn("No TMDB API key configured, showing the built-in catalog. Run 'reelify config set-api-key'.");
            String::new()
        });

        Discovery::new(
            TmdbClient::from_config(&self.config.tmdb, api_key),
            Normalizer::from_config(&self.config.tmdb),
            Catalog::builtin(),
        )
    }

    pub fn collection(&self) -> CollectionStore<JsonFileBackend> {
        CollectionStore::open(JsonFileBackend::new(&self.paths.collection_dir()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_invalid_values_only_block_validated_load() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::from_base(dir.path());
        let mut config = Config::default();
        config.tmdb.region = "TUR".to_string();
        config.save_to_file(&paths.config_file()).unwrap();

        let err = AppContext::load_from(PathManager::from_base(dir.path()), true)
            .err()
            .unwrap();
        assert!(err.to_string().contains("tmdb.region"));

        let ctx = AppContext::load_from(PathManager::from_base(dir.path()), false).unwrap();
        assert_eq!(ctx.config.tmdb.region, "TUR");
        assert!(ctx.config.validate().is_err());
    }
}
