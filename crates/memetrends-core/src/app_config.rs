use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub serpapi_api_key: String,
    /// Pool of YouTube Data API keys; one is chosen per discovery call.
    pub youtube_api_keys: Vec<String>,
    pub request_timeout_secs: u64,
    pub thumbnail_timeout_secs: u64,
    pub trends_base_url: String,
    pub youtube_base_url: String,
    pub ytdlp_path: PathBuf,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("serpapi_api_key", &"[redacted]")
            .field(
                "youtube_api_keys",
                &format!("[{} redacted]", self.youtube_api_keys.len()),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("thumbnail_timeout_secs", &self.thumbnail_timeout_secs)
            .field("trends_base_url", &self.trends_base_url)
            .field("youtube_base_url", &self.youtube_base_url)
            .field("ytdlp_path", &self.ytdlp_path)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
