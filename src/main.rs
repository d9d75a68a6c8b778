// SPDX-License-Identifier: MIT

//! DivingSpace client smoke CLI
//!
//! Restores the persisted session (silent refresh), loads the first
//! page of the community feed and prints it. Useful for checking an
//! API deployment and the client's auth plumbing end to end.

use divingspace_client::api::posts::PostQuery;
use divingspace_client::session::FileTokenStore;
use divingspace_client::{ApiClient, Config, Session};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(api = %config.api_base_url, "Starting DivingSpace client");

    let session = match &config.session_file {
        Some(path) => Session::new(Arc::new(FileTokenStore::new(path.clone()))),
        None => Session::in_memory(),
    };
    let client = ApiClient::new(&config, session)?;

    // Silent refresh: resume the stored session or start anonymous
    match client.bootstrap_session().await? {
        Some(user) => tracing::info!(username = %user.username, "Session restored"),
        None => tracing::info!("No stored session, browsing anonymously"),
    }

    let page = client.list_posts(&PostQuery::default()).await?;
    println!(
        "Feed: {} posts{}",
        page.results.len(),
        if page.has_more() { " (more available)" } else { "" }
    );
    for post in &page.results {
        println!(
            "  #{:<5} {:<30} by {:<15} {} likes, {} comments",
            post.id, post.title, post.owner, post.likes_count, post.comments_count
        );
    }

    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("divingspace_client=debug,info")),
        )
        .with_target(false)
        .init();
}
