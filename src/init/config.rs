use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::anyhow;

use super::state::{DEFAULT_THEME, DeploymentEnvironment};

const DEFAULT_HOST_IP: &str = "0.0.0.0";
const DEFAULT_HOST_PORT: u16 = 3000;

/// Where the process environment was topped up from before config was read.
pub enum EnvSource {
    ConfigFile(PathBuf),
    DotEnv(PathBuf),
    ProcessOnly,
}

impl fmt::Display for EnvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvSource::ConfigFile(path) => write!(f, "APP_CONFIG file {}", path.display()),
            EnvSource::DotEnv(path) => write!(f, "dotenv file {}", path.display()),
            EnvSource::ProcessOnly => write!(f, "process environment"),
        }
    }
}

/// Loads `APP_CONFIG` if set, else a local `.env` unless running on AWS.
/// A missing file is not an error; a malformed one is.
pub fn load_env_files() -> anyhow::Result<EnvSource> {
    if let Ok(path) = std::env::var("APP_CONFIG") {
        let path = PathBuf::from(path);
        return match dotenvy::from_path(&path) {
            Ok(()) => Ok(EnvSource::ConfigFile(path)),
            Err(e) if e.not_found() => Ok(EnvSource::ProcessOnly),
            Err(e) => Err(anyhow!("Could not load APP_CONFIG file {}: {e}", path.display())),
        };
    }

    if std::env::var("IS_AWS").is_ok() {
        return Ok(EnvSource::ProcessOnly);
    }

    match dotenvy::dotenv() {
        Ok(path) => Ok(EnvSource::DotEnv(path)),
        Err(e) if e.not_found() => Ok(EnvSource::ProcessOnly),
        Err(e) => Err(anyhow!("Could not load .env file: {e}")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSignupConfig {
    pub region: String,
    pub table_name: String,
    pub topic_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupBackend {
    Dynamo(AwsSignupConfig),
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub theme: String,
    pub debug: bool,
    pub signup_backend: SignupBackend,
    pub host_ip: IpAddr,
    pub host_port: u16,
    pub deployment_environment: DeploymentEnvironment,
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            optional(key).ok_or_else(|| anyhow!("Environment variable {key} not found"))
        };

        let signup_backend = match optional("SIGNUP_BACKEND")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("dynamo") | Some("dynamodb") | Some("aws") => {
                SignupBackend::Dynamo(AwsSignupConfig {
                    region: required("AWS_REGION")?,
                    table_name: required("STARTUP_SIGNUP_TABLE")?,
                    topic_arn: required("NEW_SIGNUP_TOPIC")?,
                })
            }
            Some("memory") | Some("in-memory") => SignupBackend::Memory,
            Some(other) => {
                return Err(anyhow!(
                    "Unsupported SIGNUP_BACKEND `{other}`; expected `dynamo` or `memory`."
                ));
            }
        };

        let host_ip: IpAddr = optional("HOST_IP")
            .unwrap_or_else(|| DEFAULT_HOST_IP.to_string())
            .trim()
            .parse()?;

        let host_port: u16 = match optional("HOST_PORT") {
            Some(port) => port.trim().parse()?,
            None => DEFAULT_HOST_PORT,
        };

        Ok(AppConfig {
            theme: optional("THEME").unwrap_or_else(|| DEFAULT_THEME.to_string()),
            debug: optional("APP_DEBUG")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            signup_backend,
            host_ip,
            host_port,
            deployment_environment: DeploymentEnvironment::from_env_value(
                optional("CURR_ENV").as_deref(),
            ),
            log_dir: optional("LOG_DIR").map(PathBuf::from),
        })
    }
}
