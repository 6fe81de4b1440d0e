use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Extracted catalog artifact (JSON array of book records)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Raw books CSV; when set the server ingests it instead of the JSON artifact
    #[serde(default)]
    pub books_csv_path: Option<String>,

    /// Result count used when a request does not ask for one
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    /// Upper bound applied to requested result counts
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_catalog_path() -> String {
    "shared/books.json".to_string()
}

fn default_top_n() -> usize {
    10
}

fn default_max_top_n() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: default_catalog_path(),
            books_csv_path: None,
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Resolves a requested result count against the configured bounds
    ///
    /// Non-positive requests resolve to zero, which yields an empty result.
    pub fn resolve_top_n(&self, requested: Option<i64>) -> usize {
        match requested {
            None => self.default_top_n.min(self.max_top_n),
            Some(n) => usize::try_from(n).unwrap_or(0).min(self.max_top_n),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
