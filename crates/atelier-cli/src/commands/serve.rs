//! Server start command.

use clap::Args;

use atelier_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the bind port
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, env: &str) -> Result<(), AppError> {
    let mut config = super::load_config(env)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    atelier_api::app::run_server(config).await
}
