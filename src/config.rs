use anyhow::{ensure, Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub instance_id: String,
}

/// Settings for the demonstration routes
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Probability (0.0..=1.0) that `/api/hello` answers with an error
    pub hello_failure_rate: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            hello_failure_rate: 0.5,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let hello_failure_rate =
            parse_failure_rate(env::var("HELLO_FAILURE_RATE").ok().as_deref())?;

        Ok(Config {
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("API_PORT must be a valid port number")?,
                // Falls back to HOSTNAME (Docker/Kubernetes), otherwise "unknown"
                instance_id: env::var("INSTANCE_ID")
                    .or_else(|_| env::var("HOSTNAME"))
                    .unwrap_or_else(|_| "unknown".to_string()),
            },
            demo: DemoConfig { hello_failure_rate },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Parse `HELLO_FAILURE_RATE`, defaulting to 0.5 when unset
fn parse_failure_rate(raw: Option<&str>) -> Result<f64> {
    let rate: f64 = match raw {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("HELLO_FAILURE_RATE must be a number, got {:?}", value))?,
        None => DemoConfig::default().hello_failure_rate,
    };
    // NaN fails the range check too
    ensure!(
        (0.0..=1.0).contains(&rate),
        "HELLO_FAILURE_RATE must be between 0.0 and 1.0, got {}",
        rate
    );
    Ok(rate)
}
