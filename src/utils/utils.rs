use std::path::{Path, PathBuf};

use regex::RegexSet;

use crate::error::{ConvertError, Result};

pub fn setup_logging(log_level: &str) -> Result<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    // 重複初始化時保留第一次的設定
    let _ = env_logger::Builder::new()
        .filter_level(log_level_filter)
        .try_init();
    Ok(())
}

/// 以副檔名建立不分大小寫的比對集合，比對對象為檔名；副檔名前至少要有一個字元
pub fn create_extension_set(extensions: &[&str]) -> Result<RegexSet> {
    let patterns: Vec<String> = extensions
        .iter()
        .map(|ext| format!(r"(?i)^.+\.{}$", regex::escape(ext.trim_start_matches('.'))))
        .collect();
    RegexSet::new(&patterns).map_err(|e| {
        log::warn!("無效的副檔名模式: {}", e);
        ConvertError::InvalidInput(format!("無效的副檔名模式: {}", e))
    })
}

/// 清理使用者輸入的路徑：去除空白與引號，展開開頭的 `~`
pub fn clean_input_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim().trim_matches('"').trim();
    if trimmed == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = trimmed
        .strip_prefix("~/")
        .or_else(|| trimmed.strip_prefix("~\\"))
    {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(trimmed)
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
