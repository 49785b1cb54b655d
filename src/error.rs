use std::path::PathBuf;

use thiserror::Error;

/// 参数解析、参数校验与搜索过程中的错误
#[derive(Error, Debug)]
pub enum SearchError {
    // 参数
    #[error("参数格式无效: {0}")]
    InvalidArgumentFormat(String),

    #[error("缺少参数: -{0}")]
    MissingArgument(String),

    #[error("不支持的搜索类型 '{0}'，可选值: name, mask, regex")]
    UnsupportedSearchType(String),

    #[error("目录不存在: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("无效的匹配模式 '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    // 运行时
    #[error("I/O 错误: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SearchError {
    /// 是否为遍历开始前的校验错误
    pub fn is_validation_error(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
