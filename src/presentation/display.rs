use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;

use crate::application::{SearchParams, SearchReport};

/// 格式化持续时间
pub fn format_duration(duration: std::time::Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}.{:03}s", secs, duration.subsec_millis())
    }
}

/// 搜索摘要
pub struct SearchSummary {
    pub directory: PathBuf,
    pub condition: String,
    pub search_type: String,
    pub output: PathBuf,
    pub files_scanned: u64,
    pub files_matched: u64,
    pub elapsed: std::time::Duration,
}

impl SearchSummary {
    pub fn new(params: &SearchParams, report: &SearchReport) -> Self {
        Self {
            directory: params.directory.clone(),
            condition: params.condition.clone(),
            search_type: params.search_type.to_string(),
            output: params.output.clone(),
            files_scanned: report.files_scanned,
            files_matched: report.files_matched,
            elapsed: report.elapsed,
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "搜索摘要:")?;
        writeln!(out, "----------------------------")?;
        writeln!(out, "搜索目录: {}", self.directory.display())?;
        writeln!(out, "搜索条件: {} ({})", self.condition, self.search_type)?;
        writeln!(out, "总用时: {}", format_duration(self.elapsed))?;
        writeln!(out, "扫描文件: {}", self.files_scanned)?;
        writeln!(out, "匹配文件: {}", self.files_matched)?;
        writeln!(out, "结果文件: {}", self.output.display())?;
        Ok(())
    }

    pub fn print(&self) -> Result<()> {
        let mut stdout = io::stdout().lock();
        self.write_to(&mut stdout)
    }
}
