//! Configuration management for the latchd server
//!
//! Deployment concerns (bind address and port, GPIO pin, the expected
//! credential pair) are external configuration: environment variables
//! with a `latchd` prefix, an optional `conf/latchd.yml` file, and CLI
//! overrides.

use clap::Parser;
use config::{Config, Environment};

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 5000;
const DEFAULT_GPIO_PIN: u8 = 14;
const DEFAULT_AUTH_USERNAME: &str = "admin";
const DEFAULT_AUTH_PASSWORD: &str = "secret";

/// Command line arguments for the server
#[derive(Debug, Parser)]
#[command()]
struct Cli {
    #[arg(short = 'a', long = "address")]
    address: Option<String>,
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,
    #[arg(long = "pin", env = "LATCHD_GPIO_PIN")]
    pin: Option<u8>,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new() -> Self {
        let args = Cli::parse();
        let mut config_builder = Config::builder()
            .add_source(
                Environment::with_prefix("latchd")
                    .separator(".")
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("conf/latchd.yml").required(false));

        if let Some(v) = args.address {
            config_builder = config_builder
                .set_override("server.address", v)
                .expect("Failed to set server address override");
        }
        if let Some(v) = args.port {
            config_builder = config_builder
                .set_override("server.port", i64::from(v))
                .expect("Failed to set server port override");
        }
        if let Some(v) = args.pin {
            config_builder = config_builder
                .set_override("gpio.pin", i64::from(v))
                .expect("Failed to set GPIO pin override");
        }

        let config = config_builder
            .build()
            .expect("Failed to build configuration - check conf/latchd.yml");

        Configuration { config }
    }

    pub fn server_address(&self) -> String {
        self.config
            .get_string("server.address")
            .unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int("server.port")
            .ok()
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    pub fn gpio_pin(&self) -> u8 {
        self.config
            .get_int("gpio.pin")
            .ok()
            .and_then(|v| u8::try_from(v).ok())
            .unwrap_or(DEFAULT_GPIO_PIN)
    }

    pub fn auth_username(&self) -> String {
        self.config
            .get_string("auth.username")
            .unwrap_or_else(|_| DEFAULT_AUTH_USERNAME.to_string())
    }

    pub fn auth_password(&self) -> String {
        self.config
            .get_string("auth.password")
            .unwrap_or_else(|_| DEFAULT_AUTH_PASSWORD.to_string())
    }

    /// Log directory, if file logging is enabled.
    pub fn log_dir(&self) -> Option<String> {
        self.config.get_string("logs.path").ok()
    }
}
