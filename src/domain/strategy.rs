use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::{Result, SearchError};

/// 搜索类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// 完整文件名
    Name,
    /// 通配符掩码
    Mask,
    /// 正则表达式
    Regex,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Name => "name",
            SearchType::Mask => "mask",
            SearchType::Regex => "regex",
        }
    }
}

impl FromStr for SearchType {
    type Err = SearchError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "name" => Ok(SearchType::Name),
            "mask" => Ok(SearchType::Mask),
            "regex" => Ok(SearchType::Regex),
            other => Err(SearchError::UnsupportedSearchType(other.to_string())),
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 文件名匹配策略
#[derive(Debug, Clone)]
pub enum SearchStrategy {
    /// 与完整文件名严格相等（区分大小写）
    Name(String),
    /// 掩码转换后的锚定正则
    Mask(Regex),
    /// 锚定的用户正则
    Regex(Regex),
}

impl SearchStrategy {
    /// 根据类型标签选择匹配策略
    pub fn resolve(type_tag: &str, condition: &str) -> Result<Self> {
        Self::new(type_tag.parse()?, condition)
    }

    /// 根据搜索类型构建匹配策略
    pub fn new(search_type: SearchType, condition: &str) -> Result<Self> {
        match search_type {
            SearchType::Name => Ok(SearchStrategy::Name(condition.to_string())),
            SearchType::Mask => {
                let regex = compile_anchored(condition, &mask_to_regex(condition))?;
                Ok(SearchStrategy::Mask(regex))
            }
            SearchType::Regex => {
                let regex = compile_anchored(condition, condition)?;
                Ok(SearchStrategy::Regex(regex))
            }
        }
    }

    pub fn search_type(&self) -> SearchType {
        match self {
            SearchStrategy::Name(_) => SearchType::Name,
            SearchStrategy::Mask(_) => SearchType::Mask,
            SearchStrategy::Regex(_) => SearchType::Regex,
        }
    }

    /// 判断文件名是否匹配
    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            SearchStrategy::Name(name) => file_name == name,
            SearchStrategy::Mask(regex) | SearchStrategy::Regex(regex) => regex.is_match(file_name),
        }
    }
}

/// 将掩码转换为正则表达式，连续的 `*` 合并为一个 `.*`
fn mask_to_regex(mask: &str) -> String {
    let mut pattern = String::with_capacity(mask.len() * 2);
    for (idx, literal) in mask.split('*').enumerate() {
        if idx > 0 && !pattern.ends_with(".*") {
            pattern.push_str(".*");
        }
        pattern.push_str(&regex::escape(literal));
    }
    pattern
}

/// 整个文件名必须完全匹配
fn compile_anchored(condition: &str, pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| SearchError::InvalidPattern {
        pattern: condition.to_string(),
        source,
    })
}
