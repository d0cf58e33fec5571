//! 外部轉換後端與依序嘗試的後端鏈。

pub mod automation;
pub mod library;
pub mod suite;

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{ConvertError, Result};
use crate::models::backend::{BackendAttempt, BackendKind, TargetFormat};
use crate::service::traits::i_service::ConversionBackend;

/// 以單一後端嘗試轉換；工具回報成功但輸出不存在時同樣視為失敗
pub fn attempt(
    backend: &dyn ConversionBackend,
    source: &Path,
    target: &Path,
    format: TargetFormat,
) -> BackendAttempt {
    let kind = backend.kind();
    debug!("使用 {} 轉換 {} -> {}", kind, source.display(), target.display());
    if let Err(e) = remove_stale_output(target) {
        return BackendAttempt::failed(kind, e);
    }
    match backend.try_convert(source, target, format) {
        Ok(()) if target.exists() => BackendAttempt::succeeded(kind),
        Ok(()) => BackendAttempt::failed(
            kind,
            ConvertError::conversion(
                kind.display_name(),
                format!("未產生預期的檔案 {}", target.display()),
            ),
        ),
        Err(e) => BackendAttempt::failed(kind, e),
    }
}

/// 刪除先前執行留下的輸出；之後存在的目標檔一定是這次產生的
pub fn remove_stale_output(target: &Path) -> Result<()> {
    match fs::remove_file(target) {
        Ok(()) => {
            debug!("移除舊的輸出檔：{}", target.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// 依宣告順序排列的後端，前一個失敗時改用下一個
pub struct BackendChain {
    backends: Vec<Box<dyn ConversionBackend>>,
}

impl BackendChain {
    pub fn new(backends: Vec<Box<dyn ConversionBackend>>) -> Self {
        BackendChain { backends }
    }

    pub fn kinds(&self) -> Vec<BackendKind> {
        self.backends.iter().map(|b| b.kind()).collect()
    }

    pub fn any_available(&self) -> bool {
        self.backends.iter().any(|b| b.is_available())
    }

    pub fn is_available(&self, kind: BackendKind) -> bool {
        self.find_available(kind).is_some()
    }

    pub fn find_available(&self, kind: BackendKind) -> Option<&dyn ConversionBackend> {
        self.backends
            .iter()
            .find(|b| b.kind() == kind && b.is_available())
            .map(|b| b.as_ref())
    }

    pub fn missing(&self) -> Vec<BackendKind> {
        self.backends
            .iter()
            .filter(|b| !b.is_available())
            .map(|b| b.kind())
            .collect()
    }

    /// 列出缺少的後端與安裝方式
    pub fn unavailable_message(&self, what: &str) -> String {
        let hints = self
            .kinds()
            .iter()
            .map(|kind| format!("{}（{}）", kind, kind.install_hint()))
            .collect::<Vec<_>>()
            .join("、");
        format!("找不到可用的 {} 轉換工具，請至少準備其中之一：{}", what, hints)
    }

    /// 依序嘗試可用的後端直到成功
    /// # 參數
    /// - on_failure: 每次嘗試失敗時立即呼叫，用於輸出逐檔訊息
    /// # 回傳
    /// - 成功時返回完成轉換的後端；全部失敗時返回最後一個錯誤，
    ///   沒有任何可用後端時返回 `BackendUnavailable`
    pub fn run<F>(
        &self,
        source: &Path,
        target: &Path,
        format: TargetFormat,
        mut on_failure: F,
    ) -> Result<BackendKind>
    where
        F: FnMut(&BackendAttempt, bool),
    {
        let available: Vec<&dyn ConversionBackend> = self
            .backends
            .iter()
            .filter(|b| b.is_available())
            .map(|b| b.as_ref())
            .collect();

        if available.is_empty() {
            let missing = self
                .missing()
                .iter()
                .map(|k| k.display_name())
                .collect::<Vec<_>>()
                .join("、");
            return Err(ConvertError::BackendUnavailable(format!(
                "沒有可用的轉換工具（缺少：{}）",
                missing
            )));
        }

        let mut last_error = None;
        let count = available.len();
        for (index, backend) in available.into_iter().enumerate() {
            let result = attempt(backend, source, target, format);
            if result.is_success() {
                info!("{} 完成轉換：{}", result.backend, target.display());
                return Ok(result.backend);
            }
            let has_next = index + 1 < count;
            on_failure(&result, has_next);
            if let Some(err) = result.error {
                warn!("{} 轉換 {} 失敗：{}", result.backend, source.display(), err);
                last_error = Some(err);
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ConvertError::conversion("轉換後端", "所有後端皆未完成轉換")
        }))
    }
}
