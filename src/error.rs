use std::io;
use thiserror::Error;

pub const EXIT_FAILURE: i32 = 1;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// 轉換流程中的錯誤分類
#[derive(Debug, Error)]
pub enum ConvertError {
    /// 選單選項、路徑或副檔名不正確，整個執行直接中止
    #[error("{0}")]
    InvalidInput(String),

    /// 主機上沒有可用的轉換工具
    #[error("{0}")]
    BackendUnavailable(String),

    /// .doc 無法轉為 .docx，只影響該檔案
    #[error(
        "無法將 .doc 轉換為 .docx：{cause}。請安裝 LibreOffice（soffice 需在 PATH 中），或調整 Word 信任中心設定以允許開啟 .doc 檔案"
    )]
    Normalization { cause: String },

    /// 外部工具轉換單一檔案失敗
    #[error("{backend} 轉換失敗：{cause}")]
    Conversion { backend: String, cause: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ConvertError {
    pub fn conversion(backend: impl Into<String>, cause: impl Into<String>) -> Self {
        ConvertError::Conversion {
            backend: backend.into(),
            cause: cause.into(),
        }
    }

    /// 是否屬於使用者輸入錯誤（尚未開始任何檔案處理）
    pub fn is_input_error(&self) -> bool {
        matches!(self, ConvertError::InvalidInput(_))
    }
}

/// 將頂層錯誤對應為程式結束碼
pub fn exit_code(err: &ConvertError) -> i32 {
    match err {
        ConvertError::InvalidInput(_)
        | ConvertError::BackendUnavailable(_)
        | ConvertError::Normalization { .. }
        | ConvertError::Conversion { .. }
        | ConvertError::Io(_) => EXIT_FAILURE,
    }
}
