use dialoguer::Input;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::config::config::{Mode, MENU_CHOICES};
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::error::{ConvertError, Result};
use crate::facade::conversion_facade::ConversionAdapter;
use crate::models::conversion::{ConversionOutput, ConversionScope};
use crate::service::config_service::ConfigService;
use crate::utils::utils::setup_logging;

pub fn process_interactive_mode() -> Result<ConversionOutput> {
    setup_logging("info")?;
    println!("=== Word / PDF 轉換工具 ===");

    let config_service = ConfigService::new(Box::new(InteractiveConfigAdapter::new()));
    let config = config_service.get_config()?;
    ConversionAdapter.execute(config)
}

pub fn print_menu() {
    println!("請選擇一個選項：");
    for (index, mode) in MENU_CHOICES.iter().enumerate() {
        println!("{}) {}", index + 1, mode.menu_label());
    }
}

/// 選單只讀一次，輸入無效時直接返回錯誤
pub fn get_menu_choice() -> Result<Mode> {
    print_menu();
    let raw = prompt_line("選項 [1/2/3/4]")?;
    Mode::from_menu_choice(&raw)
}

pub fn get_input_path(mode: Mode) -> Result<String> {
    let prompt = match mode.scope() {
        ConversionScope::Directory => "請輸入要轉換的檔案所在目錄".to_string(),
        ConversionScope::SingleFile => {
            format!("請輸入 {} 檔案路徑", mode.direction().extensions_text())
        }
    };
    prompt_line(&prompt)
}

/// 終端機使用 dialoguer；標準輸入被導向時逐行讀取
fn prompt_line(prompt: &str) -> Result<String> {
    if io::stdin().is_terminal() {
        return Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| {
                ConvertError::Io(io::Error::new(io::ErrorKind::Other, format!("輸入失敗: {}", e)))
            });
    }

    print!("{}: ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

// 互動配置適配器
pub struct InteractiveConfigAdapter;

impl InteractiveConfigAdapter {
    pub fn new() -> Self {
        InteractiveConfigAdapter
    }
}

impl Default for InteractiveConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> Result<AppConfig> {
        let mode = get_menu_choice()?;
        let raw_path = get_input_path(mode)?;
        let path = mode.validate_path(&raw_path)?;
        Ok(AppConfig::with_defaults(mode, path))
    }
}
