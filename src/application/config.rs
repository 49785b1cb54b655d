use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::WalkOptions;

/// 应用程序配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 搜索相关配置
    #[serde(default)]
    pub search: SearchConfig,
    /// 日志相关配置
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 显示相关配置
    #[serde(default)]
    pub display: DisplayConfig,
}

/// 搜索配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// 是否包含隐藏文件
    pub include_hidden: bool,
    /// 是否遵循 .gitignore 规则
    pub respect_gitignore: bool,
    /// 最大遍历深度
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 是否写日志文件
    pub enabled: bool,
    /// 日志文件所在目录
    pub log_dir: String,
}

/// 显示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// 搜索结束后是否打印摘要
    pub show_summary: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            include_hidden: true,
            respect_gitignore: false,
            max_depth: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: ".".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { show_summary: true }
    }
}

impl Config {
    /// 从配置文件加载配置，如果文件不存在则创建默认配置文件
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            let config = Self::default();
            config.save_to_file(config_path)?;
            Ok(config)
        }
    }

    /// 配置文件存在时加载，否则使用默认配置
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// 从文件加载配置
    pub fn load_from_file(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("无法读取配置文件: {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", config_path.display()))?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> Result<()> {
        // 确保目录存在
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self)
            .context("无法序列化配置")?;

        fs::write(config_path, content)
            .with_context(|| format!("无法写入配置文件: {}", config_path.display()))?;

        Ok(())
    }

    /// 获取配置文件的默认路径
    pub fn default_config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe()
            .context("无法获取程序路径")?;

        let exe_dir = exe_path.parent()
            .context("无法获取程序目录")?;

        Ok(exe_dir.join("config.toml"))
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.search.max_depth == Some(0) {
            anyhow::bail!("max_depth 必须大于 0");
        }

        if self.logging.enabled && self.logging.log_dir.trim().is_empty() {
            anyhow::bail!("启用日志时 log_dir 不能为空");
        }

        Ok(())
    }

    /// 遍历选项
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            include_hidden: self.search.include_hidden,
            respect_gitignore: self.search.respect_gitignore,
            max_depth: self.search.max_depth,
        }
    }
}
