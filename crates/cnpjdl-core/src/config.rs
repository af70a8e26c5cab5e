use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Receita Federal page listing the CNPJ open data archives.
pub const DEFAULT_URL: &str = "http://receita.economia.gov.br/orientacao/tributaria/cadastros/\
cadastro-nacional-de-pessoas-juridicas-cnpj/dados-publicos-cnpj";

/// Where archives land when neither the config file nor the CLI says otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "/tmp/serenata-data/companies";

/// Id of the element wrapping the archive links on the index page.
pub const DEFAULT_CONTAINER_ID: &str = "content-core";

/// Archive filenames look like `<prefix>_<digits>.zip`.
pub const DEFAULT_ARCHIVE_PREFIX: &str = "DADOS_ABERTOS_CNPJ";

/// Dataset source configuration, loaded from `~/.config/cnpjdl/config.toml`.
///
/// One value is built per run and shared read-only by every task of that run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Index page listing the archives.
    pub url: String,
    /// Directory the archives are written to.
    pub output_dir: PathBuf,
    /// Leave an archive alone (and skip its request) when the destination already exists.
    #[serde(default)]
    pub skip_existing: bool,
    /// Maximum number of archives transferred at once. `None` starts every
    /// transfer immediately.
    #[serde(default)]
    pub max_concurrent_downloads: Option<usize>,
    /// Id of the container element whose anchors are scanned.
    #[serde(default = "default_container_id")]
    pub container_id: String,
    /// Filename prefix of the archives.
    #[serde(default = "default_archive_prefix")]
    pub archive_prefix: String,
}

fn default_container_id() -> String {
    DEFAULT_CONTAINER_ID.to_string()
}

fn default_archive_prefix() -> String {
    DEFAULT_ARCHIVE_PREFIX.to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            skip_existing: false,
            max_concurrent_downloads: Some(4),
            container_id: default_container_id(),
            archive_prefix: default_archive_prefix(),
        }
    }
}

impl DatasetConfig {
    /// Concurrency limit actually applied by the scheduler for `link_count` links.
    pub fn effective_concurrency(&self, link_count: usize) -> usize {
        match self.max_concurrent_downloads {
            Some(n) => n.max(1).min(link_count.max(1)),
            None => link_count.max(1),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cnpjdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DatasetConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DatasetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: DatasetConfig = toml::from_str(&data)?;
    Ok(cfg)
}
