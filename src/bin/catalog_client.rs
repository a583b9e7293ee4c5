//! 目录命令行客户端
//! 按过滤条件请求商品列表，并以文本形式展示

use std::time::Duration;

use clap::Parser;
use gold_catalog::app::ui::CatalogPage;
use gold_catalog::{ApiClient, AppConfig, FilterParams, GoldColor};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "catalog_client", about = "Query the gold jewelry catalog API")]
struct Args {
    /// API base URL (defaults to the configured client.api_url)
    #[arg(long)]
    api_url: Option<String>,

    /// Minimum price, inclusive
    #[arg(long)]
    min_price: Option<f64>,

    /// Maximum price, inclusive
    #[arg(long)]
    max_price: Option<f64>,

    /// Minimum rating, inclusive
    #[arg(long)]
    min_rating: Option<f64>,

    /// Gold color used for every card image
    #[arg(long, default_value = "yellow")]
    color: GoldColor,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Only check /health
    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::WARN).init();

    let args = Args::parse();
    let config = AppConfig::load()?;

    let client = ApiClient::new(
        args.api_url.unwrap_or(config.client.api_url),
        Duration::from_secs(args.timeout.unwrap_or(config.client.timeout_seconds)),
    );

    if args.health {
        let health = client.health().await?;
        println!(
            "status: {}, environment: {}, port: {}",
            health.status, health.environment, health.port
        );
        return Ok(());
    }

    let params = FilterParams {
        min_price: args.min_price,
        max_price: args.max_price,
        min_rating: args.min_rating,
    };

    let mut page = CatalogPage::new();
    page.load(&client, params).await;

    let names: Vec<String> = page
        .display()
        .cards()
        .iter()
        .map(|card| card.product().name.clone())
        .collect();
    for name in &names {
        page.display_mut().select_color(name, args.color);
    }

    print!("{}", page.render_text());

    if let Some(failure) = page.failure() {
        anyhow::bail!("request failed: {}", failure);
    }
    Ok(())
}
