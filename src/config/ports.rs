use std::path::PathBuf;

use crate::config::config::Mode;
use crate::error::Result;
use crate::models::conversion::{ConversionInput, ConversionOutput};

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: Mode,
    pub path: PathBuf,
    pub log_level: String,
    pub soffice: Option<PathBuf>,
    pub delegate_batch: bool,
}

impl AppConfig {
    /// 只指定模式與路徑，其餘使用預設值
    pub fn with_defaults(mode: Mode, path: PathBuf) -> Self {
        AppConfig {
            mode,
            path,
            log_level: "info".to_string(),
            soffice: None,
            delegate_batch: false,
        }
    }

    pub fn conversion_input(&self) -> ConversionInput {
        ConversionInput {
            path: self.path.clone(),
            direction: self.mode.direction(),
            scope: self.mode.scope(),
            delegate_batch: self.delegate_batch,
        }
    }
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> Result<AppConfig>;
}

// 轉換執行的 Port
pub trait ConversionPort {
    fn execute(&self, config: AppConfig) -> Result<ConversionOutput>;
}
