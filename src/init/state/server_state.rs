use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use crate::domain::signup::{signup_notifier::SignupNotifier, signup_store::SignupStore};

use super::builder::ServerStateBuilder;
use super::deployment_environment::DeploymentEnvironment;

pub struct ServerState {
    pub(crate) app_name_version: String,
    pub(crate) server_start_time: tokio::time::Instant,
    pub(crate) responses_handled: AtomicU64,
    pub(crate) signup_store: Arc<dyn SignupStore>, // source of truth for email uniqueness
    pub(crate) signup_notifier: Arc<dyn SignupNotifier>,
    pub(crate) theme: String,
    pub(crate) debug: bool,
    pub(crate) deployment_environment: DeploymentEnvironment,
}

impl ServerState {
    pub fn builder() -> ServerStateBuilder {
        ServerStateBuilder::default()
    }

    pub fn get_app_name_version(&self) -> String {
        self.app_name_version.clone()
    }

    pub fn get_uptime(&self) -> tokio::time::Duration {
        self.server_start_time.elapsed()
    }

    pub fn signup_store(&self) -> &dyn SignupStore {
        self.signup_store.as_ref()
    }

    pub fn signup_notifier(&self) -> &dyn SignupNotifier {
        self.signup_notifier.as_ref()
    }

    pub fn get_theme(&self) -> &str {
        &self.theme
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn get_deployment_environment(&self) -> DeploymentEnvironment {
        self.deployment_environment
    }

    pub fn get_responses_handled(&self) -> u64 {
        self.responses_handled
            .load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn add_responses_handled(&self) {
        self.responses_handled
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}
