use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;

/// 日志记录器trait
pub trait LoggerTrait: Send + Sync {
    fn is_enabled(&self) -> bool;
    fn log_message(&self, message: &str) -> Result<()>;
    fn log_match(&self, path: &Path) -> Result<()>;
    fn finalize(&self, files_scanned: u64, files_matched: u64, duration: Duration) -> Result<()>;
}

/// 搜索日志记录器
pub struct Logger {
    log_file: Mutex<Option<File>>,
    log_path: Option<PathBuf>,
}

impl Logger {
    /// 不写任何内容的日志记录器
    pub fn disabled() -> Self {
        Self {
            log_file: Mutex::new(None),
            log_path: None,
        }
    }

    /// 创建新的日志记录器，启用时在 `log_dir` 下生成带时间戳的日志文件
    pub fn new(enabled: bool, log_dir: &Path) -> Result<Self> {
        if !enabled {
            return Ok(Self::disabled());
        }

        let now = Local::now();
        let log_path = log_dir.join(format!("findfiles_{}.log", now.format("%Y%m%d_%H%M%S")));

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("无法创建日志文件: {}", log_path.display()))?;

        writeln!(file, "# findfiles 日志")?;
        writeln!(file, "# 开始时间: {}", now.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(file, "# --------------------------------------------")?;

        Ok(Self {
            log_file: Mutex::new(Some(file)),
            log_path: Some(log_path),
        })
    }

    /// 日志文件路径，未启用时为 `None`
    pub fn path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    fn write_line(&self, line: &str) -> Result<()> {
        if let Ok(mut file_guard) = self.log_file.lock() {
            if let Some(ref mut file) = *file_guard {
                writeln!(file, "{}", line)?;
                file.flush()?;
            }
        }
        Ok(())
    }
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

impl LoggerTrait for Logger {
    fn is_enabled(&self) -> bool {
        self.log_path.is_some()
    }

    fn log_message(&self, message: &str) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        self.write_line(&format!("[{}] {}", timestamp(), message))
    }

    fn log_match(&self, path: &Path) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        self.write_line(&format!("[{}] 匹配: {}", timestamp(), path.display()))
    }

    fn finalize(&self, files_scanned: u64, files_matched: u64, duration: Duration) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let now = Local::now();
        self.write_line("# --------------------------------------------")?;
        self.write_line(&format!("# 搜索完成时间: {}", now.format("%Y-%m-%d %H:%M:%S")))?;
        self.write_line(&format!("# 总用时: {:.3}秒", duration.as_secs_f64()))?;
        self.write_line(&format!("# 扫描文件数: {}", files_scanned))?;
        self.write_line(&format!("# 匹配文件数: {}", files_matched))?;
        self.write_line("# ============================================")
    }
}
