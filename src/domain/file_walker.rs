use std::io;
use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};

use super::strategy::SearchStrategy;
use crate::error::{Result, SearchError};

/// 遍历选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// 是否包含隐藏文件
    pub include_hidden: bool,
    /// 是否遵循 .gitignore 规则
    pub respect_gitignore: bool,
    /// 最大遍历深度，根目录为 0
    pub max_depth: Option<usize>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            include_hidden: true,
            respect_gitignore: false,
            max_depth: None,
        }
    }
}

/// 遍历结果
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// 按遍历顺序排列的匹配文件绝对路径
    pub matches: Vec<PathBuf>,
    /// 检查过的普通文件数
    pub files_scanned: u64,
    /// 路径不是有效 UTF-8 而被跳过的文件
    pub skipped: Vec<PathBuf>,
}

/// 遍历目录树，收集文件名匹配的普通文件
///
/// 每个目录下的条目按文件名排序，同一文件系统状态下结果顺序固定。
/// 不跟随符号链接，任何遍历错误都会中止并返回。
/// `exclude` 指向的文件（通常是结果文件本身）不参与匹配，也不计入扫描数。
/// 路径不是有效 UTF-8 的文件无法写入 UTF-8 结果文件，记入 `skipped` 后跳过。
pub fn collect_matches<F>(
    dir: &Path,
    strategy: &SearchStrategy,
    options: &WalkOptions,
    exclude: Option<&Path>,
    mut on_match: F,
) -> Result<WalkOutcome>
where
    F: FnMut(&Path),
{
    let root = absolute_path(dir)?;
    let exclude = exclude.map(absolute_path).transpose()?;

    let mut builder = WalkBuilder::new(&root);
    builder
        .standard_filters(false)
        .hidden(!options.include_hidden) // hidden(true) 表示跳过隐藏文件
        .git_global(options.respect_gitignore)
        .git_ignore(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .require_git(false)
        .follow_links(false)
        .max_depth(options.max_depth)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut outcome = WalkOutcome::default();
    for result in builder.build() {
        let entry = result.map_err(|err| walk_error(&root, err))?;

        // 只处理文件
        if !is_regular_file(&entry) {
            continue;
        }
        if exclude.as_deref() == Some(entry.path()) {
            continue;
        }

        if entry.path().to_str().is_none() {
            outcome.skipped.push(entry.into_path());
            continue;
        }
        outcome.files_scanned += 1;

        // 完整路径是 UTF-8，文件名必然也是
        let file_name = entry.file_name().to_str().unwrap_or_default();
        if strategy.matches(file_name) {
            on_match(entry.path());
            outcome.matches.push(entry.into_path());
        }
    }

    Ok(outcome)
}

fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().map_or(false, |ft| ft.is_file())
}

/// 转换为绝对路径，不解析符号链接
fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|source| SearchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(cwd.join(path))
}

/// 出错条目的路径，取不到时为 `None`
fn error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::Loop { child, .. } => Some(child.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

fn walk_error(root: &Path, err: ignore::Error) -> SearchError {
    let path = error_path(&err).unwrap_or_else(|| root.to_path_buf());
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
    SearchError::Io { path, source }
}
