//! 库级错误类型

/// 错误类型定义
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("配置文件读取失败: {0}")]
    ConfigRead(String),
    #[error("配置解析失败: {0}")]
    ConfigParse(String),
    #[error("配置校验失败: {0}")]
    ConfigValidation(String),
    #[error("商品数据读取失败: {0}")]
    DatasetRead(String),
    #[error("商品数据解析失败: {0}")]
    DatasetParse(String),
    #[error("商品数据无效: {0}")]
    InvalidDataset(String),
    #[error("日志初始化失败: {0}")]
    Logging(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
