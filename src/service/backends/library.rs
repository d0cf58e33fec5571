use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

use crate::error::{ConvertError, Result};
use crate::models::backend::{BackendKind, TargetFormat};
use crate::service::traits::i_service::ConversionBackend;
use crate::utils::process::run_to_completion;

fn require<'a>(binary: &'a Option<PathBuf>, kind: BackendKind) -> Result<&'a Path> {
    binary.as_deref().ok_or_else(|| {
        ConvertError::BackendUnavailable(format!("找不到 {}，請{}", kind, kind.install_hint()))
    })
}

fn check_format(kind: BackendKind, format: TargetFormat, expected: TargetFormat) -> Result<()> {
    if format != expected {
        return Err(ConvertError::conversion(
            kind.display_name(),
            format!("不支援輸出 .{}", format.extension()),
        ));
    }
    Ok(())
}

/// docx2pdf 命令列：`docx2pdf <input> <output>`，輸入也可以是目錄
pub struct Docx2PdfBackend {
    binary: Option<PathBuf>,
}

impl Docx2PdfBackend {
    pub fn new(binary: Option<PathBuf>) -> Self {
        Docx2PdfBackend { binary }
    }

    pub fn command(binary: &Path, input: &Path, output: &Path) -> Command {
        let mut command = Command::new(binary);
        command.arg(input).arg(output);
        command
    }
}

impl ConversionBackend for Docx2PdfBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::WordToPdfLibrary
    }

    fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    fn try_convert(&self, source: &Path, target: &Path, format: TargetFormat) -> Result<()> {
        let binary = require(&self.binary, self.kind())?;
        check_format(self.kind(), format, TargetFormat::Pdf)?;
        let mut command = Self::command(binary, source, target);
        run_to_completion(self.kind(), &mut command)
    }

    fn try_convert_dir(&self, source_dir: &Path, output_dir: &Path) -> Result<()> {
        let binary = require(&self.binary, self.kind())?;
        info!("以 {} 批次轉換目錄 {}", self.kind(), source_dir.display());
        let mut command = Self::command(binary, source_dir, output_dir);
        run_to_completion(self.kind(), &mut command)
    }
}

/// pdf2docx 命令列：`pdf2docx convert <input.pdf> <output.docx>`，每次只處理一個檔案
pub struct Pdf2DocxBackend {
    binary: Option<PathBuf>,
}

impl Pdf2DocxBackend {
    pub fn new(binary: Option<PathBuf>) -> Self {
        Pdf2DocxBackend { binary }
    }

    pub fn command(binary: &Path, source: &Path, target: &Path) -> Command {
        let mut command = Command::new(binary);
        command.arg("convert").arg(source).arg(target);
        command
    }
}

impl ConversionBackend for Pdf2DocxBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::PdfToWordLibrary
    }

    fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    fn try_convert(&self, source: &Path, target: &Path, format: TargetFormat) -> Result<()> {
        let binary = require(&self.binary, self.kind())?;
        check_format(self.kind(), format, TargetFormat::Docx)?;
        // 每個檔案各自啟動轉換行程，結束（或失敗）時由 guard 回收
        let mut command = Self::command(binary, source, target);
        run_to_completion(self.kind(), &mut command)
    }
}
