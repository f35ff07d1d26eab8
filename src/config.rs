use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub blob_dir: String,
    pub static_dir: String,
    /// Base URL prepended to blob names when building video URLs
    pub public_base_url: String,
    pub speech_key: Option<String>,
    pub speech_region: Option<String>,
    pub max_upload_bytes: usize,
    pub queue_poll_interval_ms: u64,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/videoshare.db".to_string());

        let blob_dir = env::var("BLOB_DIR").unwrap_or_else(|_| "./data/blobs".to_string());

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string());

        let public_base_url =
            env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        // Speech credentials are optional: without them every submission fails
        // and the transcribe endpoint runs in degraded demo mode.
        let speech_key = env::var("SPEECH_KEY").ok().filter(|s| !s.is_empty());
        let speech_region = env::var("SPEECH_REGION").ok().filter(|s| !s.is_empty());

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "209715200".to_string())
            .parse()
            .map_err(|_| "Invalid MAX_UPLOAD_BYTES")?;

        let queue_poll_interval_ms = env::var("QUEUE_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .map_err(|_| "Invalid QUEUE_POLL_INTERVAL_MS")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            server_host,
            server_port,
            database_path,
            blob_dir,
            static_dir,
            public_base_url,
            speech_key,
            speech_region,
            max_upload_bytes,
            queue_poll_interval_ms,
            environment,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
