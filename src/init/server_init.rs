use std::net::SocketAddr;
use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_types::region::Region;
use tracing::{info, warn};

use crate::domain::signup::{
    signup_notifier::{LogSignupNotifier, SignupNotifier},
    signup_store::{InMemorySignupStore, SignupStore},
};
use crate::routers::main_router::build_router;
use crate::util::aws::{
    dynamo_signup_store::DynamoSignupStore, sns_signup_notifier::SnsSignupNotifier,
};

use super::{
    config::{AppConfig, SignupBackend},
    state::ServerState,
};

pub async fn server_init_proc(start: tokio::time::Instant, config: AppConfig) -> anyhow::Result<()> {
    let (signup_store, signup_notifier): (Arc<dyn SignupStore>, Arc<dyn SignupNotifier>) =
        match &config.signup_backend {
            SignupBackend::Dynamo(aws) => {
                let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(aws.region.clone()))
                    .load()
                    .await;

                info!(
                    region = %aws.region,
                    table = %aws.table_name,
                    topic = %aws.topic_arn,
                    "AWS signup clients configured"
                );

                let store: Arc<dyn SignupStore> = Arc::new(DynamoSignupStore::from_sdk_config(
                    &sdk_config,
                    aws.table_name.clone(),
                ));
                let notifier: Arc<dyn SignupNotifier> = Arc::new(
                    SnsSignupNotifier::from_sdk_config(&sdk_config, aws.topic_arn.clone()),
                );
                (store, notifier)
            }
            SignupBackend::Memory => {
                warn!("Using the in-memory signup store; signups are lost on restart.");
                let store: Arc<dyn SignupStore> = Arc::new(InMemorySignupStore::new());
                let notifier: Arc<dyn SignupNotifier> = Arc::new(LogSignupNotifier);
                (store, notifier)
            }
        };

    let state = Arc::new(
        ServerState::builder()
            .app_name_version(format!(
                "{} {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .server_start_time(start)
            .signup_store(signup_store)
            .signup_notifier(signup_notifier)
            .theme(config.theme.clone())
            .debug(config.debug)
            .deployment_environment(config.deployment_environment)
            .build()?,
    );

    let addr = SocketAddr::new(config.host_ip, config.host_port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        %addr,
        theme = %state.get_theme(),
        debug = state.is_debug(),
        environment = state.get_deployment_environment().as_str(),
        elapsed = ?start.elapsed(),
        "Signup server starting..."
    );

    axum::serve(
        listener,
        build_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
