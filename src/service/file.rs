use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::service::traits::i_service::FileServiceTrait;
use crate::utils::utils::create_extension_set;

/// 檔案服務，負責探索來源檔案與建立輸出目錄
pub struct FileService;

impl FileService {
    pub fn new() -> Self {
        FileService
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

impl FileServiceTrait for FileService {
    fn discover(&self, dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        let extension_set = create_extension_set(extensions)?;
        let mut files = Vec::new();

        // 只看直接子項目，不進入子目錄
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            // 根目錄無法讀取才中止；壞掉的連結或無權限的項目只略過
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(std::io::Error::from(e).into()),
                Err(e) => {
                    warn!("略過無法讀取的項目：{}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if extension_set.is_match(&name) {
                files.push(entry.into_path());
            } else {
                debug!("略過不符合副檔名的檔案：{}", name);
            }
        }

        info!("在 {} 中找到 {} 個可轉換的檔案", dir.display(), files.len());
        Ok(files)
    }

    fn ensure_dir(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        Ok(dir.to_path_buf())
    }
}
