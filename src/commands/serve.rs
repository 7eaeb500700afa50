//! `procintel serve`: run the tool server on stdin/stdout.

use anyhow::{Context, Result};

use crate::core::config::Config;
use crate::server::Server;

pub async fn execute(config: Config) -> Result<()> {
    Server::new(config)
        .serve_stdio()
        .await
        .context("Tool server stopped with an error")
}
