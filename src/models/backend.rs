use std::fmt;

use crate::error::ConvertError;

/// 可用的外部轉換後端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    HeadlessSuite,
    VendorAutomation,
    WordToPdfLibrary,
    PdfToWordLibrary,
}

impl BackendKind {
    pub fn display_name(self) -> &'static str {
        match self {
            BackendKind::HeadlessSuite => "LibreOffice (soffice)",
            BackendKind::VendorAutomation => "Microsoft Word 自動化",
            BackendKind::WordToPdfLibrary => "docx2pdf",
            BackendKind::PdfToWordLibrary => "pdf2docx",
        }
    }

    /// 缺少該後端時給操作人員的安裝提示
    pub fn install_hint(self) -> &'static str {
        match self {
            BackendKind::HeadlessSuite => "安裝 LibreOffice 並將 soffice 加入 PATH",
            BackendKind::VendorAutomation => "在 Windows 上安裝 Microsoft Word",
            BackendKind::WordToPdfLibrary => "執行 pip install docx2pdf",
            BackendKind::PdfToWordLibrary => "執行 pip install pdf2docx",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// 轉換的目標格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    Pdf,
    Docx,
}

impl TargetFormat {
    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Pdf => "pdf",
            TargetFormat::Docx => "docx",
        }
    }

    /// Word `SaveAs` 的 FileFormat 值（wdFormatPDF / wdFormatXMLDocument）
    pub fn word_save_format(self) -> u32 {
        match self {
            TargetFormat::Pdf => 17,
            TargetFormat::Docx => 16,
        }
    }
}

/// 單一後端對單一檔案的一次嘗試
#[derive(Debug)]
pub struct BackendAttempt {
    pub backend: BackendKind,
    pub error: Option<ConvertError>,
}

impl BackendAttempt {
    pub fn succeeded(backend: BackendKind) -> Self {
        BackendAttempt { backend, error: None }
    }

    pub fn failed(backend: BackendKind, error: ConvertError) -> Self {
        BackendAttempt {
            backend,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
