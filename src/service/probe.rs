use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::models::backend::BackendKind;
use crate::models::conversion::Direction;

/// 依序嘗試的 LibreOffice 執行檔名稱
pub const SUITE_BINARIES: &[&str] = &["soffice", "libreoffice"];
pub const DOCX2PDF_BINARY: &str = "docx2pdf";
pub const PDF2DOCX_BINARY: &str = "pdf2docx";

/// 啟動時一次性的外部工具探測結果，之後只讀
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub suite: Option<PathBuf>,
    pub word_automation: Option<PathBuf>,
    pub docx2pdf: Option<PathBuf>,
    pub pdf2docx: Option<PathBuf>,
}

impl Capabilities {
    /// 探測 PATH 上的工具；`suite_override` 指定時只檢查該路徑
    pub fn probe(suite_override: Option<&Path>) -> Self {
        let suite = match suite_override {
            Some(path) => resolve(path),
            None => SUITE_BINARIES.iter().find_map(|name| resolve(name)),
        };
        let capabilities = Capabilities {
            suite,
            word_automation: probe_word_automation(),
            docx2pdf: resolve(DOCX2PDF_BINARY),
            pdf2docx: resolve(PDF2DOCX_BINARY),
        };
        info!("外部工具探測結果：{:?}", capabilities);
        capabilities
    }

    pub fn has(&self, kind: BackendKind) -> bool {
        match kind {
            BackendKind::HeadlessSuite => self.suite.is_some(),
            BackendKind::VendorAutomation => self.word_automation.is_some(),
            BackendKind::WordToPdfLibrary => self.docx2pdf.is_some(),
            BackendKind::PdfToWordLibrary => self.pdf2docx.is_some(),
        }
    }

    pub fn can_convert(&self, direction: Direction) -> bool {
        match direction {
            Direction::WordToPdf => {
                self.has(BackendKind::HeadlessSuite)
                    || self.has(BackendKind::WordToPdfLibrary)
                    || self.has(BackendKind::VendorAutomation)
            }
            Direction::PdfToWord => self.has(BackendKind::PdfToWordLibrary),
        }
    }

    pub fn can_normalize(&self) -> bool {
        self.has(BackendKind::HeadlessSuite) || self.has(BackendKind::VendorAutomation)
    }
}

fn resolve<S: AsRef<OsStr>>(name: S) -> Option<PathBuf> {
    let name = name.as_ref();
    match which::which(name) {
        Ok(path) => {
            debug!("找到 {:?}：{}", name, path.display());
            Some(path)
        }
        Err(e) => {
            debug!("找不到 {:?}：{}", name, e);
            None
        }
    }
}

/// Word 自動化只存在於 Windows：需要 PowerShell 且已註冊 Word.Application
#[cfg(windows)]
fn probe_word_automation() -> Option<PathBuf> {
    use std::process::{Command, Stdio};

    let powershell = resolve("powershell")?;
    let registered = Command::new("reg")
        .args(["query", r"HKEY_CLASSES_ROOT\Word.Application"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false);
    if registered {
        Some(powershell)
    } else {
        debug!("未註冊 Word.Application，略過 Word 自動化");
        None
    }
}

#[cfg(not(windows))]
fn probe_word_automation() -> Option<PathBuf> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_capabilities_support_nothing() {
        let caps = Capabilities::default();
        assert!(!caps.can_convert(Direction::WordToPdf));
        assert!(!caps.can_convert(Direction::PdfToWord));
        assert!(!caps.can_normalize());
    }

    #[test]
    fn library_alone_cannot_normalize() {
        let caps = Capabilities {
            docx2pdf: Some(PathBuf::from("/usr/bin/docx2pdf")),
            ..Capabilities::default()
        };
        assert!(caps.can_convert(Direction::WordToPdf));
        assert!(!caps.can_normalize());
        assert!(!caps.can_convert(Direction::PdfToWord));
    }

    #[test]
    fn suite_covers_normalization_and_pdf() {
        let caps = Capabilities {
            suite: Some(PathBuf::from("/usr/bin/soffice")),
            ..Capabilities::default()
        };
        assert!(caps.can_normalize());
        assert!(caps.can_convert(Direction::WordToPdf));
        assert!(caps.has(BackendKind::HeadlessSuite));
    }

    #[test]
    fn missing_override_is_not_resolved() {
        let caps = Capabilities::probe(Some(Path::new("/definitely/not/here/soffice")));
        assert!(caps.suite.is_none());
    }
}
