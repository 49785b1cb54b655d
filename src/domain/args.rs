use std::collections::HashMap;

use crate::error::{Result, SearchError};

/// `-key=value` 形式的命令行参数
#[derive(Debug, Clone, Default)]
pub struct ArgsParser {
    values: HashMap<String, String>,
}

impl ArgsParser {
    /// 解析参数列表，任意一项不符合 `-<key>=<value>` 即失败
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let mut values = HashMap::with_capacity(tokens.len());
        for token in tokens {
            let (key, value) = split_token(token.as_ref())?;
            // 重复的键以最后一次出现为准
            values.insert(key.to_string(), value.to_string());
        }
        Ok(Self { values })
    }

    /// 获取参数值
    pub fn get(&self, key: &str) -> Result<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| SearchError::MissingArgument(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 拆分单个参数，值从第一个 `=` 之后开始
fn split_token(token: &str) -> Result<(&str, &str)> {
    let body = token.strip_prefix('-').ok_or_else(|| {
        SearchError::InvalidArgumentFormat(format!("参数必须以 '-' 开头: {}", token))
    })?;

    let (key, value) = body.split_once('=').ok_or_else(|| {
        SearchError::InvalidArgumentFormat(format!("参数缺少 '=': {}", token))
    })?;

    if key.is_empty() {
        return Err(SearchError::InvalidArgumentFormat(format!(
            "参数名不能为空: {}",
            token
        )));
    }

    Ok((key, value))
}
