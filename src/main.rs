use gold_catalog::infrastructure::logger::Logger;
use gold_catalog::{server, AppConfig, ProductStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // guard 需要活到进程结束，否则文件日志会丢失尾部内容
    let _guard = Logger::init(&config.logging)?;

    let store = ProductStore::load(config.data.products_path.as_deref())?;
    server::run(config, store).await
}
