use std::path::{Path, PathBuf};

use crate::models::backend::TargetFormat;
use crate::utils::utils::display_name;

pub const PDF_OUTPUT_DIR: &str = "convert_pdfs";
pub const WORD_OUTPUT_DIR: &str = "convert_words";
pub const LEGACY_WORD_EXTENSION: &str = "doc";

/// 轉換方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    WordToPdf,
    PdfToWord,
}

impl Direction {
    /// 可接受的來源副檔名（不含點，比對時不分大小寫）
    pub fn accepted_extensions(self) -> &'static [&'static str] {
        match self {
            Direction::WordToPdf => &["docx", "doc"],
            Direction::PdfToWord => &["pdf"],
        }
    }

    pub fn output_subdir(self) -> &'static str {
        match self {
            Direction::WordToPdf => PDF_OUTPUT_DIR,
            Direction::PdfToWord => WORD_OUTPUT_DIR,
        }
    }

    pub fn target_format(self) -> TargetFormat {
        match self {
            Direction::WordToPdf => TargetFormat::Pdf,
            Direction::PdfToWord => TargetFormat::Docx,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::WordToPdf => "Word → PDF",
            Direction::PdfToWord => "PDF → Word",
        }
    }

    /// 例如 ".docx 或 .doc"
    pub fn extensions_text(self) -> String {
        self.accepted_extensions()
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect::<Vec<_>>()
            .join(" 或 ")
    }

    pub fn accepts(self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.accepted_extensions()
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOrigin {
    Batch,
    Standalone,
}

/// 單一檔案的轉換請求，建立後不再變更
#[derive(Debug, Clone)]
pub struct ConversionJob {
    source: PathBuf,
    direction: Direction,
    origin: JobOrigin,
}

impl ConversionJob {
    pub fn new(source: impl Into<PathBuf>, direction: Direction, origin: JobOrigin) -> Self {
        ConversionJob {
            source: source.into(),
            direction,
            origin,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn origin(&self) -> JobOrigin {
        self.origin
    }

    /// 舊版二進位 Word 格式（.doc）
    pub fn is_legacy(&self) -> bool {
        is_legacy_word(&self.source)
    }

    pub fn file_name(&self) -> String {
        display_name(&self.source)
    }

    pub fn output_location(&self) -> OutputLocation {
        OutputLocation::for_source(&self.source, self.direction)
    }
}

pub fn is_legacy_word(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(LEGACY_WORD_EXTENSION))
        .unwrap_or(false)
}

/// 輸出位置：`<來源目錄>/<方向子目錄>/<主檔名>.<目標副檔名>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    pub dir: PathBuf,
    pub target: PathBuf,
}

impl OutputLocation {
    pub fn for_source(source: &Path, direction: Direction) -> Self {
        let parent = source.parent().unwrap_or_else(|| Path::new(""));
        let dir = output_dir_for(parent, direction);
        let target = target_in(&dir, source, direction.target_format());
        OutputLocation { dir, target }
    }
}

pub fn output_dir_for(source_dir: &Path, direction: Direction) -> PathBuf {
    source_dir.join(direction.output_subdir())
}

/// 在 `dir` 中以來源主檔名加上目標副檔名組成路徑
pub fn target_in(dir: &Path, source: &Path, format: TargetFormat) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    dir.join(format!("{}.{}", stem, format.extension()))
}

/// 一次批次執行的統計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub converted: usize,
    pub total: usize,
    pub output_dir: PathBuf,
}

impl BatchResult {
    pub fn new(total: usize, output_dir: PathBuf) -> Self {
        BatchResult {
            converted: 0,
            total,
            output_dir,
        }
    }

    pub fn record(&mut self, success: bool) {
        if success {
            self.converted += 1;
        }
    }

    pub fn failed(&self) -> usize {
        self.total - self.converted
    }

    pub fn summary(&self, direction: Direction) -> String {
        let target = match direction {
            Direction::WordToPdf => "PDF",
            Direction::PdfToWord => "Word",
        };
        format!(
            "完成：{}/{} 個檔案已轉換為 {}，輸出目錄：{}",
            self.converted,
            self.total,
            target,
            self.output_dir.display()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionScope {
    Directory,
    SingleFile,
}

#[derive(Debug, Clone)]
pub struct ConversionInput {
    pub path: PathBuf,
    pub direction: Direction,
    pub scope: ConversionScope,
    pub delegate_batch: bool,
}

#[derive(Debug)]
pub struct ConversionOutput {
    pub result: BatchResult,
}
