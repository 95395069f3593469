use init::{
    config::{AppConfig, load_env_files},
    server_init::server_init_proc,
    tracing_init::init_tracing,
};
use tracing::info;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// modules tree
pub mod docs;
pub mod domain {
    pub mod signup {
        pub mod signup_notifier;
        pub mod signup_record;
        pub mod signup_store;
    }
}
pub mod dto {
    pub mod responses {
        pub mod response_data;
        pub mod response_meta;
        pub mod server {
            pub mod healthcheck_response;
        }
    }
}
pub mod errors {
    pub mod code_error;
}
pub mod handlers {
    pub mod fallback;
    pub mod server {
        pub mod healthcheck;
    }
    pub mod signup {
        pub mod signup;
    }
    pub mod site {
        pub mod static_assets;
        pub mod welcome;
    }
}
pub mod routers {
    pub mod main_router;
    pub mod middleware {
        pub mod logging;
    }
}
pub mod init {
    pub mod config;
    pub mod server_init;
    pub mod state;
    pub mod tracing_init;
}
pub mod util {
    pub mod aws {
        pub mod dynamo_signup_store;
        pub mod sns_signup_notifier;
    }
    pub mod time {
        pub mod duration_formatter;
        pub mod now;
    }
}
#[cfg(test)]
pub mod test_support;

// main function
#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let start = tokio::time::Instant::now();

    let env_source = load_env_files()?;
    let config = AppConfig::from_env()?;
    let _log_guard = init_tracing(config.log_dir.as_deref())?;

    info!(env_source = %env_source, "Initializing server...");
    server_init_proc(start, config).await?;

    Ok(())
}
