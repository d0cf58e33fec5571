use crate::error::Result;
use crate::models::conversion::{ConversionInput, ConversionOutput};

// Facade 接口，負責協調檔案轉換流程
pub trait ConversionFacadeTrait {
    /// 執行目錄或單一檔案的轉換
    /// # 參數
    /// - input: 轉換所需的輸入參數
    /// # 回傳
    /// - 成功時返回轉換統計（包含部分失敗），輸入無效或完全沒有可用工具時返回錯誤
    fn execute_conversion(&self, input: ConversionInput) -> Result<ConversionOutput>;
}
