use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{ConvertError, Result};
use crate::models::backend::TargetFormat;
use crate::models::conversion::target_in;
use crate::service::backends::BackendChain;
use crate::service::traits::i_service::NormalizerTrait;

/// .doc → .docx 正規化：先用 LibreOffice，再用 Word 自動化
pub struct LegacyNormalizer {
    chain: BackendChain,
}

impl LegacyNormalizer {
    pub fn new(chain: BackendChain) -> Self {
        LegacyNormalizer { chain }
    }
}

impl NormalizerTrait for LegacyNormalizer {
    fn normalize(&self, source: &Path, output_dir: &Path) -> Result<PathBuf> {
        let target = target_in(output_dir, source, TargetFormat::Docx);
        info!("將舊版格式 {} 轉換為 {}", source.display(), target.display());

        match self.chain.run(source, &target, TargetFormat::Docx, |attempt, has_next| {
            if let Some(err) = &attempt.error {
                if has_next {
                    warn!("{} 無法轉換 {}：{}，改用下一個方式", attempt.backend, source.display(), err);
                }
            }
        }) {
            Ok(_) => Ok(target),
            Err(ConvertError::BackendUnavailable(_)) => {
                let missing = self
                    .chain
                    .missing()
                    .iter()
                    .map(|kind| kind.display_name())
                    .collect::<Vec<_>>()
                    .join(" 與 ");
                Err(ConvertError::Normalization {
                    cause: format!("找不到 {}", missing),
                })
            }
            Err(e) => Err(ConvertError::Normalization {
                cause: e.to_string(),
            }),
        }
    }
}
