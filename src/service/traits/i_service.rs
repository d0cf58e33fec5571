use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::models::backend::{BackendKind, TargetFormat};

// File 服務接口，負責檔案探索與輸出目錄
pub trait FileServiceTrait {
    /// 列出目錄中（不遞迴）副檔名符合的檔案
    /// # 參數
    /// - dir: 來源目錄
    /// - extensions: 可接受的副檔名，不分大小寫
    /// # 回傳
    /// - 成功時返回符合的檔案列表，可能為空
    fn discover(&self, dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>>;

    /// 建立輸出目錄，已存在時不視為錯誤
    fn ensure_dir(&self, dir: &Path) -> Result<PathBuf>;
}

// 轉換後端接口，每個外部工具一個實作
pub trait ConversionBackend {
    fn kind(&self) -> BackendKind;

    /// 啟動時探測結果，執行期間不再重新探測
    fn is_available(&self) -> bool;

    /// 將 `source` 轉換為 `target`
    /// # 參數
    /// - source: 來源檔案
    /// - target: 預期輸出路徑，其所在目錄必須已存在
    /// - format: 目標格式
    /// # 回傳
    /// - 工具執行成功時返回 Ok；呼叫端仍須確認 `target` 確實存在
    fn try_convert(&self, source: &Path, target: &Path, format: TargetFormat) -> Result<()>;

    /// 整個目錄一次轉換；不支援的後端直接回報不可用
    fn try_convert_dir(&self, _source_dir: &Path, _output_dir: &Path) -> Result<()> {
        Err(ConvertError::BackendUnavailable(format!(
            "{} 不支援目錄批次轉換",
            self.kind()
        )))
    }
}

// 舊版格式正規化接口（.doc → .docx）
pub trait NormalizerTrait {
    /// 在 `output_dir` 中產生對應的 .docx 並返回其路徑
    fn normalize(&self, source: &Path, output_dir: &Path) -> Result<PathBuf>;
}
