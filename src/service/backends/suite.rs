use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{ConvertError, Result};
use crate::models::backend::{BackendKind, TargetFormat};
use crate::service::traits::i_service::ConversionBackend;
use crate::utils::process::run_to_completion;

/// LibreOffice 無頭模式：`soffice --headless --convert-to <fmt> --outdir <dir> <file>`
pub struct HeadlessSuiteBackend {
    binary: Option<PathBuf>,
}

impl HeadlessSuiteBackend {
    pub fn new(binary: Option<PathBuf>) -> Self {
        HeadlessSuiteBackend { binary }
    }

    pub fn command(binary: &Path, source: &Path, out_dir: &Path, format: TargetFormat) -> Command {
        let mut command = Command::new(binary);
        command
            .arg("--headless")
            .arg("--convert-to")
            .arg(format.extension())
            .arg("--outdir")
            .arg(out_dir)
            .arg(source);
        command
    }
}

impl ConversionBackend for HeadlessSuiteBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::HeadlessSuite
    }

    fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    fn try_convert(&self, source: &Path, target: &Path, format: TargetFormat) -> Result<()> {
        let binary = self.binary.as_deref().ok_or_else(|| {
            ConvertError::BackendUnavailable(format!(
                "找不到 {}，請{}",
                self.kind(),
                self.kind().install_hint()
            ))
        })?;
        // soffice 以來源主檔名命名輸出，只能指定目錄
        let out_dir = target.parent().unwrap_or_else(|| Path::new("."));
        let mut command = Self::command(binary, source, out_dir, format);
        run_to_completion(self.kind(), &mut command)
    }
}
