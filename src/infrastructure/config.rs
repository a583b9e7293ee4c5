//! 配置基础设施
//!
//! 配置来源依次为：默认值、TOML 配置文件、环境变量覆盖。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{info, warn};

use crate::{CatalogError, Result};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "CATALOG_CONFIG";
/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config/catalog.toml";

/// 系统配置结构
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP 服务配置
    pub server: ServerConfig,
    /// 数据集配置
    pub data: DataConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 客户端配置
    pub client: ClientConfig,
}

/// 运行环境
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// 生产环境下由本服务提供静态资源
    pub fn serves_static_assets(self) -> bool {
        self == Environment::Production
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(CatalogError::ConfigValidation(format!(
                "未知的运行环境: {}",
                other
            ))),
        }
    }
}

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP 服务端口
    pub port: u16,
    /// 绑定地址
    pub bind_address: String,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
    /// 运行环境
    pub environment: Environment,
    /// 静态资源目录，仅生产环境使用
    pub static_dir: PathBuf,
}

/// 数据集配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// 商品 JSON 文件路径，未设置时使用内置数据集
    pub products_path: Option<PathBuf>,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
    /// 日志目录，设置后按日期滚动写入文件
    pub log_dir: Option<PathBuf>,
    /// 日志文件名前缀
    pub file_prefix: String,
}

/// 客户端配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API 基础地址
    pub api_url: String,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            bind_address: "0.0.0.0".to_string(),
            timeout_seconds: 30,
            environment: Environment::Development,
            static_dir: PathBuf::from("public"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            file_prefix: "catalog".to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3001".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl AppConfig {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| CatalogError::ConfigRead(format!("{}: {}", path.as_ref().display(), e)))?;

        toml::from_str(&content).map_err(|e| CatalogError::ConfigParse(e.to_string()))
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CatalogError::ConfigParse(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path.as_ref(), content)?;

        Ok(())
    }

    /// 加载配置文件（不存在时使用默认值），再应用环境变量覆盖并校验
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = if Path::new(&path).exists() {
            info!("从配置文件加载: {}", path);
            Self::load_from_file(&path)?
        } else {
            info!("未找到配置文件 {}，使用默认配置", path);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 应用环境变量覆盖：PORT、APP_ENV（未设置时读取 NODE_ENV）、CATALOG_API_URL
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| CatalogError::ConfigValidation(format!("无效的 PORT: {}", port)))?;
        }
        if let Some(env) = lookup("APP_ENV") {
            self.server.environment = env.parse()?;
        } else if let Some(env) = lookup("NODE_ENV") {
            // NODE_ENV 常见 test 等取值，无法识别时保留配置文件中的环境
            match env.parse::<Environment>() {
                Ok(environment) => self.server.environment = environment,
                Err(e) => warn!("忽略 NODE_ENV: {}", e),
            }
        }
        if let Some(url) = lookup("CATALOG_API_URL") {
            if url.trim().is_empty() {
                warn!("CATALOG_API_URL 为空，忽略");
            } else {
                self.client.api_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(CatalogError::ConfigValidation("HTTP端口必须大于0".to_string()));
        }
        if self.server.bind_address.is_empty() {
            return Err(CatalogError::ConfigValidation("绑定地址不能为空".to_string()));
        }
        if self.server.timeout_seconds == 0 || self.client.timeout_seconds == 0 {
            return Err(CatalogError::ConfigValidation("超时时间必须大于0".to_string()));
        }
        if self.client.api_url.is_empty() {
            return Err(CatalogError::ConfigValidation("API 地址不能为空".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(CatalogError::ConfigValidation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}
