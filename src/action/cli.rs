use clap::Parser;
use std::path::PathBuf;

use crate::action::interactive::process_interactive_mode;
use crate::config::config::Cli;
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::error::{ConvertError, Result};
use crate::facade::conversion_facade::ConversionAdapter;
use crate::models::conversion::{ConversionOutput, Direction};
use crate::service::config_service::ConfigService;
use crate::utils::utils::{clean_input_path, setup_logging};

pub fn process_args(args: Vec<String>) -> Result<ConversionOutput> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode(args)
    }
}

pub fn process_cli_mode(args: Vec<String>) -> Result<ConversionOutput> {
    let cli = Cli::try_parse_from(args).map_err(|e| {
        // --help / --version 由 clap 直接輸出並以 0 結束
        if !e.use_stderr() {
            e.exit();
        }
        ConvertError::InvalidInput(e.to_string().trim_end().to_string())
    })?;
    setup_logging(&cli.log_level)?;

    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli.clone())));
    let config = config_service.get_config()?;

    let conversion_port: Box<dyn ConversionPort> = Box::new(ConversionAdapter);
    let output = conversion_port.execute(config.clone())?;

    // 若啟用 --show-config，在轉換後顯示配置
    if cli.show_config {
        println!("實際使用的配置：{:#?}", config);
    }

    Ok(output)
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> Result<AppConfig> {
        let path = self.cli.mode.validate_path(&self.cli.path)?;
        let soffice: Option<PathBuf> = self.cli.soffice.as_deref().map(clean_input_path);

        if self.cli.delegate_batch && self.cli.mode.direction() != Direction::WordToPdf {
            log::warn!("--delegate-batch 只適用於 Word -> PDF，將被忽略");
        }

        Ok(AppConfig {
            mode: self.cli.mode,
            path,
            log_level: self.cli.log_level.clone(),
            soffice,
            delegate_batch: self.cli.delegate_batch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::Mode;
    use std::fs::File;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["word_pdf_convert"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn adapter_validates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().display().to_string();
        let config = CliConfigAdapter::new(cli(&["pdf-dir-to-word", &path, "--log-level", "warn"]))
            .get_config()
            .unwrap();
        assert_eq!(config.mode, Mode::PdfDirToWord);
        assert_eq!(config.path, dir.path());
        assert_eq!(config.log_level, "warn");

        let missing = dir.path().join("missing").display().to_string();
        let err = CliConfigAdapter::new(cli(&["pdf-dir-to-word", &missing]))
            .get_config()
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn adapter_validates_file_extension() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        File::create(&notes).unwrap();
        let err = CliConfigAdapter::new(cli(&["word-file-to-pdf", &notes.display().to_string()]))
            .get_config()
            .unwrap_err();
        assert!(err.to_string().contains(".docx 或 .doc"));
    }

    #[test]
    fn unknown_mode_is_input_error() {
        let args = vec!["word_pdf_convert".to_string(), "spreadsheet".to_string(), "/docs".to_string()];
        let err = process_cli_mode(args).unwrap_err();
        assert!(err.is_input_error());
    }
}
