use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use crate::domain::signup::{signup_notifier::SignupNotifier, signup_store::SignupStore};

use super::deployment_environment::DeploymentEnvironment;
use super::server_state::ServerState;

pub const DEFAULT_THEME: &str = "default";

#[derive(Default)]
pub struct ServerStateBuilder {
    app_name_version: Option<String>,
    server_start_time: Option<tokio::time::Instant>,
    signup_store: Option<Arc<dyn SignupStore>>,
    signup_notifier: Option<Arc<dyn SignupNotifier>>,
    theme: Option<String>,
    debug: bool,
    deployment_environment: Option<DeploymentEnvironment>,
}

impl ServerStateBuilder {
    pub fn app_name_version(mut self, app_name_version: String) -> Self {
        self.app_name_version = Some(app_name_version);
        self
    }

    pub fn server_start_time(mut self, server_start_time: tokio::time::Instant) -> Self {
        self.server_start_time = Some(server_start_time);
        self
    }

    pub fn signup_store(mut self, signup_store: Arc<dyn SignupStore>) -> Self {
        self.signup_store = Some(signup_store);
        self
    }

    pub fn signup_notifier(mut self, signup_notifier: Arc<dyn SignupNotifier>) -> Self {
        self.signup_notifier = Some(signup_notifier);
        self
    }

    pub fn theme(mut self, theme: String) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn deployment_environment(mut self, deployment_environment: DeploymentEnvironment) -> Self {
        self.deployment_environment = Some(deployment_environment);
        self
    }

    pub fn build(self) -> anyhow::Result<ServerState> {
        Ok(ServerState {
            app_name_version: self
                .app_name_version
                .ok_or_else(|| anyhow::anyhow!("app_name_version is required"))?,
            server_start_time: self
                .server_start_time
                .ok_or_else(|| anyhow::anyhow!("server_start_time is required"))?,
            responses_handled: AtomicU64::new(0u64),
            signup_store: self
                .signup_store
                .ok_or_else(|| anyhow::anyhow!("signup_store is required"))?,
            signup_notifier: self
                .signup_notifier
                .ok_or_else(|| anyhow::anyhow!("signup_notifier is required"))?,
            theme: self.theme.unwrap_or_else(|| DEFAULT_THEME.to_string()),
            debug: self.debug,
            deployment_environment: self
                .deployment_environment
                .unwrap_or(DeploymentEnvironment::Prod),
        })
    }
}
