use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::models::conversion::{ConversionScope, Direction};
use crate::utils::utils::clean_input_path;

#[derive(Parser, Clone, Debug)]
#[command(
    name = "word_pdf_convert",
    about = "批次或單一檔案的 Word (.doc/.docx) 與 PDF 互轉工具",
    long_about = "將目錄中的 Word 文件轉為 PDF（輸出至 convert_pdfs），或將 PDF 轉為 Word（輸出至 convert_words）。\n不帶任何參數執行時進入互動選單。\n實際轉換由 LibreOffice (soffice)、docx2pdf、pdf2docx 或 Microsoft Word 完成。",
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(value_enum)]
    pub mode: Mode,
    pub path: String,
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
    /// 指定 soffice 執行檔路徑，不從 PATH 搜尋
    #[arg(long)]
    pub soffice: Option<String>,
    /// 沒有 LibreOffice 時，把整個目錄一次交給 docx2pdf
    #[arg(long, default_value_t = false)]
    pub delegate_batch: bool,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq, Debug)]
pub enum Mode {
    WordDirToPdf,
    PdfDirToWord,
    WordFileToPdf,
    PdfFileToWord,
}

pub const MENU_CHOICES: [Mode; 4] = [
    Mode::WordDirToPdf,
    Mode::PdfDirToWord,
    Mode::WordFileToPdf,
    Mode::PdfFileToWord,
];

impl Mode {
    /// 選單輸入 1-4 對應的模式，其他輸入一律視為錯誤
    pub fn from_menu_choice(raw: &str) -> Result<Mode> {
        match raw.trim() {
            "1" => Ok(Mode::WordDirToPdf),
            "2" => Ok(Mode::PdfDirToWord),
            "3" => Ok(Mode::WordFileToPdf),
            "4" => Ok(Mode::PdfFileToWord),
            other => {
                log::error!("無效的選項：{}", other);
                Err(ConvertError::InvalidInput(
                    "無效的選項，請選擇 1、2、3 或 4".to_string(),
                ))
            }
        }
    }

    pub fn menu_label(self) -> &'static str {
        match self {
            Mode::WordDirToPdf => "Word (.doc/.docx) 目錄 -> PDF",
            Mode::PdfDirToWord => "PDF 目錄 -> Word (.docx)",
            Mode::WordFileToPdf => "單一 Word (.doc/.docx) 檔案 -> PDF",
            Mode::PdfFileToWord => "單一 PDF 檔案 -> Word (.docx)",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Mode::WordDirToPdf | Mode::WordFileToPdf => Direction::WordToPdf,
            Mode::PdfDirToWord | Mode::PdfFileToWord => Direction::PdfToWord,
        }
    }

    pub fn scope(self) -> ConversionScope {
        match self {
            Mode::WordDirToPdf | Mode::PdfDirToWord => ConversionScope::Directory,
            Mode::WordFileToPdf | Mode::PdfFileToWord => ConversionScope::SingleFile,
        }
    }

    /// 依模式驗證使用者輸入的路徑
    pub fn validate_path(self, raw: &str) -> Result<PathBuf> {
        match self.scope() {
            ConversionScope::Directory => validate_directory(raw),
            ConversionScope::SingleFile => validate_file(raw, self.direction()),
        }
    }
}

pub fn validate_directory(raw: &str) -> Result<PathBuf> {
    let path = clean_input_path(raw);
    if !path.is_dir() {
        log::error!("目錄不存在：{}", path.display());
        return Err(ConvertError::InvalidInput(format!(
            "目錄不存在：{}",
            path.display()
        )));
    }
    Ok(path)
}

pub fn validate_file(raw: &str, direction: Direction) -> Result<PathBuf> {
    let path = clean_input_path(raw);
    validate_file_path(&path, direction)?;
    Ok(path)
}

/// 檔案必須存在、是一般檔案，且副檔名符合轉換方向
pub fn validate_file_path(path: &Path, direction: Direction) -> Result<()> {
    if !path.is_file() || !direction.accepts(path) {
        log::error!("無效的檔案：{}", path.display());
        return Err(ConvertError::InvalidInput(format!(
            "無效的檔案（{}）：{}",
            direction.extensions_text(),
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    #[test]
    fn menu_choices_map_to_modes() {
        assert_eq!(Mode::from_menu_choice("1").unwrap(), Mode::WordDirToPdf);
        assert_eq!(Mode::from_menu_choice(" 2 ").unwrap(), Mode::PdfDirToWord);
        assert_eq!(Mode::from_menu_choice("3").unwrap(), Mode::WordFileToPdf);
        assert_eq!(Mode::from_menu_choice("4\n").unwrap(), Mode::PdfFileToWord);
        for (index, mode) in MENU_CHOICES.iter().enumerate() {
            assert_eq!(Mode::from_menu_choice(&(index + 1).to_string()).unwrap(), *mode);
        }
    }

    #[test]
    fn invalid_menu_choice_is_input_error() {
        for raw in ["0", "5", "", "one", "1.0"] {
            let err = Mode::from_menu_choice(raw).unwrap_err();
            assert!(err.is_input_error(), "{raw}");
        }
    }

    #[test]
    fn modes_know_direction_and_scope() {
        assert_eq!(Mode::WordFileToPdf.direction(), Direction::WordToPdf);
        assert_eq!(Mode::PdfDirToWord.direction(), Direction::PdfToWord);
        assert_eq!(Mode::WordDirToPdf.scope(), ConversionScope::Directory);
        assert_eq!(Mode::PdfFileToWord.scope(), ConversionScope::SingleFile);
    }

    #[test]
    fn directory_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let quoted = format!("\"{}\"", dir.path().display());
        assert_eq!(validate_directory(&quoted).unwrap(), dir.path());

        let missing = dir.path().join("missing");
        let err = validate_directory(&missing.display().to_string()).unwrap_err();
        assert!(err.to_string().contains("目錄不存在"));

        let file = dir.path().join("a.docx");
        File::create(&file).unwrap();
        assert!(validate_directory(&file.display().to_string()).is_err());
    }

    #[test]
    fn file_must_match_direction_extension() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("b.DOC");
        let pdf = dir.path().join("report.pdf");
        File::create(&doc).unwrap();
        File::create(&pdf).unwrap();

        assert!(validate_file(&doc.display().to_string(), Direction::WordToPdf).is_ok());
        assert!(validate_file(&pdf.display().to_string(), Direction::PdfToWord).is_ok());

        let err = validate_file(&pdf.display().to_string(), Direction::WordToPdf).unwrap_err();
        assert!(err.to_string().contains(".docx 或 .doc"));
        assert!(err.to_string().contains("report.pdf"));

        let folder = dir.path().join("folder.pdf");
        fs::create_dir(&folder).unwrap();
        assert!(validate_file(&folder.display().to_string(), Direction::PdfToWord).is_err());
        assert!(
            validate_file(&dir.path().join("none.pdf").display().to_string(), Direction::PdfToWord)
                .is_err()
        );
    }

    #[test]
    fn cli_parses_mode_and_flags() {
        let cli = Cli::try_parse_from([
            "word_pdf_convert",
            "word-dir-to-pdf",
            "/docs",
            "--delegate-batch",
            "--soffice",
            "/opt/libreoffice/program/soffice",
        ])
        .unwrap();
        assert_eq!(cli.mode, Mode::WordDirToPdf);
        assert_eq!(cli.path, "/docs");
        assert!(cli.delegate_batch);
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.soffice.as_deref(), Some("/opt/libreoffice/program/soffice"));
    }

    #[test]
    fn cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["word_pdf_convert", "spreadsheet", "/docs"]).is_err());
    }
}
