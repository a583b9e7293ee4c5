//! 日志基础设施

use std::io;

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::LoggingConfig;
use crate::{CatalogError, Result};

pub struct Logger;

impl Logger {
    /// 初始化日志系统
    ///
    /// 控制台总是输出；配置了 `log_dir` 时再按日期滚动写入文件。
    /// `RUST_LOG` 优先于配置中的级别。返回的 guard 需要持有到进程结束，
    /// 否则文件日志可能丢失尾部内容。
    pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .map_err(|e| CatalogError::Logging(e.to_string()))?;

        let (file_layer, guard) = match &config.log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let file_appender = rolling::daily(dir, &config.file_prefix);
                let (writer, guard) = non_blocking(file_appender);
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false) // 文件中不使用颜色
                    .with_target(false)
                    .with_thread_names(true);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(fmt::layer().with_writer(io::stdout).with_ansi(true))
            .try_init()
            .map_err(|e| CatalogError::Logging(e.to_string()))?;

        Ok(guard)
    }
}
