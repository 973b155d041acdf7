use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the report service
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Check the report service at startup
    #[arg(long, env = "BACKEND_HEALTH_CHECK")]
    pub health_check: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub health_check: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub title: String,
    pub static_dir: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("backend.base_url", "http://localhost:5122")?
            .set_default("backend.health_check", true)?
            .set_default("ui.title", "Sustainability Assistant")?
            .set_default("ui.static_dir", "static")?;

        // 2. Optional config file (format picked from the extension)
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // 3. Environment variables, e.g. SUSTAIN_CHAT_BACKEND__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix("SUSTAIN_CHAT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI flags (and their plain env aliases) win over everything
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("backend.base_url", url)?;
        }
        if let Some(check) = cli.health_check {
            builder = builder.set_override("backend.health_check", check)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }

    /// Address the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = AppConfig {
            server: ServerConfig {
                port: 8080,
                host: "127.0.0.1".into(),
            },
            backend: BackendConfig {
                base_url: "http://localhost:5122".into(),
                health_check: false,
            },
            ui: UiConfig {
                title: "Test".into(),
                static_dir: "static".into(),
            },
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_rejects_unknown_flag() {
        assert!(AppConfig::load_from_args(["sustain-chat", "--bogus"]).is_err());
    }
}
