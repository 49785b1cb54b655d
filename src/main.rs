use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use findfiles::{Config, FilesSearcher, Logger, SearchError, SearchSummary};

/// 按文件名、掩码或正则表达式查找文件，并将绝对路径写入结果文件
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// 启用日志记录，日志文件保存到配置的 log_dir
    #[clap(long)]
    log: bool,

    /// 配置文件路径 (默认使用程序同级目录下的 config.toml)
    #[clap(long)]
    config: Option<PathBuf>,

    /// 不打印搜索摘要
    #[clap(long)]
    quiet: bool,

    /// 搜索参数: -d=<目录> -n=<条件> -t=<name|mask|regex> -o=<输出文件>
    #[clap(required = true, allow_hyphen_values = true, trailing_var_arg = true)]
    search_args: Vec<String>,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_or_create(path)?,
        None => Config::load_or_default(&Config::default_config_path()?)?,
    };
    config.validate().context("配置无效")?;
    Ok(config)
}

const USAGE: &str = "用法: findfiles [--log] [--config <文件>] [--quiet] -d=<目录> -n=<条件> -t=<name|mask|regex> -o=<输出文件>";

/// 校验错误先打印用法提示，运行时错误附带搜索目录
fn describe(err: SearchError, directory: Option<&Path>) -> anyhow::Error {
    if err.is_validation_error() {
        eprintln!("{}", USAGE);
        anyhow!(err)
    } else {
        let context = match directory {
            Some(dir) => format!("搜索失败: {}", dir.display()),
            None => "搜索失败".to_string(),
        };
        anyhow!(err).context(context)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;

    // 参数错误在遍历前返回
    let params = FilesSearcher::new()
        .validate(&args.search_args)
        .map_err(|err| describe(err, None))?;

    // 初始化日志记录器
    let log_enabled = args.log || config.logging.enabled;
    let logger = Arc::new(Logger::new(log_enabled, Path::new(&config.logging.log_dir))?);
    if let Some(path) = logger.path() {
        println!("日志文件: {}", path.display());
    }

    let searcher = FilesSearcher::with_options(config.walk_options(), logger.clone());
    let report = searcher
        .run(&params)
        .map_err(|err| describe(err, Some(&params.directory)))?;

    if config.display.show_summary && !args.quiet {
        SearchSummary::new(&params, &report).print()?;
    }

    Ok(())
}
