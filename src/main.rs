use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_site::cms::CmsClient;
use portfolio_site::config::SiteConfig;
use portfolio_site::pages;
use portfolio_site::state::AppState;
use portfolio_site::templates::load_templates;

#[tokio::main]
async fn main() {
    // logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SiteConfig::from_env();
    if config.cms.api_token.is_none() {
        warn!("CMS_API_TOKEN is not set; blog pages will render empty");
    }

    let templates = load_templates()
        .await
        .expect("Failed to load template files");

    let cms = CmsClient::new(config.cms.clone());
    let port = config.port;
    let state = Arc::new(AppState {
        config,
        templates,
        cms,
    });

    let app = pages::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "listening");
    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
