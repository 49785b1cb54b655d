//! 参数校验、匹配策略选择与结果输出。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::{collect_matches, ArgsParser, SearchStrategy, SearchType, WalkOptions};
use crate::error::{Result, SearchError};
use crate::infrastructure::{Logger, LoggerTrait};

/// 必需的参数键：目录、条件、类型、输出文件
pub const REQUIRED_KEYS: [&str; 4] = ["d", "n", "t", "o"];

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

/// 校验后的搜索参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub directory: PathBuf,
    pub condition: String,
    pub search_type: SearchType,
    pub output: PathBuf,
}

/// 一次搜索的统计
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub files_scanned: u64,
    pub files_matched: u64,
    pub elapsed: Duration,
}

/// 文件搜索器
pub struct FilesSearcher {
    options: WalkOptions,
    logger: Arc<dyn LoggerTrait>,
}

impl Default for FilesSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FilesSearcher {
    pub fn new() -> Self {
        Self::with_options(WalkOptions::default(), Arc::new(Logger::disabled()))
    }

    pub fn with_options(options: WalkOptions, logger: Arc<dyn LoggerTrait>) -> Self {
        Self { options, logger }
    }

    /// 校验原始命令行参数，不做任何写操作
    pub fn validate<S: AsRef<str>>(&self, raw_args: &[S]) -> Result<SearchParams> {
        if raw_args.len() != REQUIRED_KEYS.len() {
            return Err(SearchError::InvalidArgumentFormat(format!(
                "需要 {} 个参数 (-d=<目录> -n=<条件> -t=<name|mask|regex> -o=<输出文件>)，实际为 {}",
                REQUIRED_KEYS.len(),
                raw_args.len()
            )));
        }

        let args = ArgsParser::parse(raw_args)?;
        if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !args.contains(key)) {
            return Err(SearchError::InvalidArgumentFormat(format!(
                "缺少必需参数 -{}",
                missing
            )));
        }

        let search_type: SearchType = args.get("t")?.parse()?;

        let directory = PathBuf::from(args.get("d")?);
        if !directory.is_dir() {
            return Err(SearchError::InvalidPath(directory));
        }

        Ok(SearchParams {
            directory,
            condition: args.get("n")?.to_string(),
            search_type,
            output: PathBuf::from(args.get("o")?),
        })
    }

    /// 按校验后的参数执行搜索
    pub fn run(&self, params: &SearchParams) -> Result<SearchReport> {
        self.search_files(
            &params.directory,
            &params.condition,
            params.search_type.as_str(),
            &params.output,
        )
    }

    /// 搜索 `directory` 下文件名满足条件的普通文件，并将绝对路径逐行写入 `output`
    ///
    /// `output` 会被创建或覆盖；没有匹配时得到一个空文件。
    pub fn search_files(
        &self,
        directory: &Path,
        condition: &str,
        type_search: &str,
        output: &Path,
    ) -> Result<SearchReport> {
        let start_time = Instant::now();
        let strategy = SearchStrategy::resolve(type_search, condition)?;

        // 日志失败不影响搜索
        let _ = self.logger.log_message(&format!("目标目录: {}", directory.display()));
        let _ = self.logger.log_message(&format!("搜索条件: {}", condition));
        let _ = self.logger.log_message(&format!("搜索类型: {}", strategy.search_type()));
        let _ = self.logger.log_message(&format!("输出文件: {}", output.display()));

        let logger = Arc::clone(&self.logger);
        // 结果文件位于搜索目录下时不能成为候选，否则重复搜索结果会变化
        let outcome = collect_matches(directory, &strategy, &self.options, Some(output), |path| {
            let _ = logger.log_match(path);
        })?;
        for path in &outcome.skipped {
            let _ = self
                .logger
                .log_message(&format!("已跳过(路径不是 UTF-8): {}", path.display()));
        }

        write_results(output, &outcome.matches)?;

        let report = SearchReport {
            files_scanned: outcome.files_scanned,
            files_matched: outcome.matches.len() as u64,
            elapsed: start_time.elapsed(),
        };
        let _ = self
            .logger
            .finalize(report.files_scanned, report.files_matched, report.elapsed);

        Ok(report)
    }
}

/// 覆盖写入结果，每行一个路径，路径均已确认是 UTF-8
fn write_results(output: &Path, paths: &[PathBuf]) -> Result<()> {
    let io_error = |source| SearchError::Io {
        path: output.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(output).map_err(io_error)?);
    for path in paths {
        write!(writer, "{}{}", path.display(), LINE_SEPARATOR).map_err(io_error)?;
    }
    writer.flush().map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(dir: &Path, condition: &str, type_search: &str, output: &Path) -> Vec<String> {
        vec![
            format!("-d={}", dir.display()),
            format!("-n={}", condition),
            format!("-t={}", type_search),
            format!("-o={}", output.display()),
        ]
    }

    #[test]
    fn test_validate_ok() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("out.txt");
        let raw = args(temp_dir.path(), "**.tmp", "mask", &out);

        let params = FilesSearcher::new().validate(&raw).unwrap();
        assert_eq!(params.directory, temp_dir.path());
        assert_eq!(params.condition, "**.tmp");
        assert_eq!(params.search_type, SearchType::Mask);
        assert_eq!(params.output, out);
        assert!(!out.exists());
    }

    #[test]
    fn test_validate_wrong_count() {
        let raw = ["-d=c:/", "-n=**.tmp", "-t=mask"];
        let err = FilesSearcher::new().validate(&raw).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgumentFormat(_)));
    }

    #[test]
    fn test_validate_missing_key() {
        let temp_dir = tempdir().unwrap();
        let raw = vec![
            format!("-d={}", temp_dir.path().display()),
            "-n=x".to_string(),
            "-t=name".to_string(),
            "-x=out.txt".to_string(),
        ];
        let err = FilesSearcher::new().validate(&raw).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgumentFormat(_)));
    }

    #[test]
    fn test_validate_malformed_token() {
        let raw = ["-d=c:/", "n=**.tmp", "-t=mask", "-o=out.txt"];
        let err = FilesSearcher::new().validate(&raw).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgumentFormat(_)));
    }

    #[test]
    fn test_validate_unsupported_type() {
        let raw = ["-d=c:/", "-n=**.tmp", "-t=fileName", "-o=c:/target/files.txt"];
        let err = FilesSearcher::new().validate(&raw).unwrap_err();
        assert!(matches!(err, SearchError::UnsupportedSearchType(ref t) if t == "fileName"));
    }

    #[test]
    fn test_validate_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing");
        let raw = args(&missing, "x", "name", &temp_dir.path().join("out.txt"));
        let err = FilesSearcher::new().validate(&raw).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPath(ref p) if *p == missing));
    }

    #[test]
    fn test_validate_directory_is_file() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "").unwrap();
        let raw = args(&file, "x", "name", &temp_dir.path().join("out.txt"));
        let err = FilesSearcher::new().validate(&raw).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPath(_)));
    }

    #[test]
    fn test_search_overwrites_output() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("root");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), "").unwrap();
        let out = temp_dir.path().join("out.txt");
        fs::write(&out, "stale line\nanother\n").unwrap();

        let report = FilesSearcher::new().search_files(&root, "a.txt", "name", &out).unwrap();
        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.files_matched, 1);

        let content = fs::read_to_string(&out).unwrap();
        assert_eq!(content, format!("{}{}", root.join("a.txt").display(), LINE_SEPARATOR));
    }

    #[test]
    fn test_output_inside_root_is_not_listed() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("log.txt"), "").unwrap();
        let out = root.join("target.txt");

        let searcher = FilesSearcher::new();
        let first = searcher.search_files(root, "*.txt", "mask", &out).unwrap();
        let first_bytes = fs::read(&out).unwrap();
        let second = searcher.search_files(root, "*.txt", "mask", &out).unwrap();
        let second_bytes = fs::read(&out).unwrap();

        let expected = format!("{}{}", root.join("log.txt").display(), LINE_SEPARATOR);
        assert_eq!(String::from_utf8(first_bytes.clone()).unwrap(), expected);
        assert_eq!(first_bytes, second_bytes);
        assert_eq!(first.files_scanned, 1);
        assert_eq!(second.files_scanned, 1);
    }

    #[test]
    fn test_search_unsupported_type_writes_nothing() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("out.txt");
        let err = FilesSearcher::new()
            .search_files(temp_dir.path(), "x", "glob", &out)
            .unwrap_err();
        assert!(matches!(err, SearchError::UnsupportedSearchType(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_unwritable_output_is_io_error() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("no_such_dir").join("out.txt");
        let err = FilesSearcher::new()
            .search_files(temp_dir.path(), "x", "name", &out)
            .unwrap_err();
        assert!(matches!(err, SearchError::Io { ref path, .. } if *path == out));
    }

    #[test]
    fn test_run_with_logger() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("root");
        let logs = temp_dir.path().join("logs");
        fs::create_dir(&root).unwrap();
        fs::create_dir(&logs).unwrap();
        fs::write(root.join("hit.log"), "").unwrap();
        fs::write(root.join("miss.txt"), "").unwrap();

        let logger = Arc::new(Logger::new(true, &logs).unwrap());
        let searcher = FilesSearcher::with_options(WalkOptions::default(), logger.clone());
        let out = temp_dir.path().join("out.txt");
        let raw = args(&root, "*.log", "mask", &out);

        let params = searcher.validate(&raw).unwrap();
        let report = searcher.run(&params).unwrap();
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.files_matched, 1);

        let log = fs::read_to_string(logger.path().unwrap()).unwrap();
        assert!(log.contains("hit.log"));
        assert!(!log.contains("miss.txt"));
        assert!(log.contains("# 匹配文件数: 1"));
    }
}
