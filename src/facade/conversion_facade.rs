use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::config::config::validate_file_path;
use crate::config::ports::{AppConfig, ConversionPort};
use crate::error::{ConvertError, Result};
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::backend::{BackendKind, TargetFormat};
use crate::models::conversion::{
    is_legacy_word, output_dir_for, target_in, BatchResult, ConversionInput, ConversionJob,
    ConversionOutput, ConversionScope, Direction, JobOrigin,
};
use crate::service::backends::automation::{PowerShellWordHost, WordAutomationBackend};
use crate::service::backends::library::{Docx2PdfBackend, Pdf2DocxBackend};
use crate::service::backends::suite::HeadlessSuiteBackend;
use crate::service::backends::{remove_stale_output, BackendChain};
use crate::service::file::FileService;
use crate::service::normalize::LegacyNormalizer;
use crate::service::probe::Capabilities;
use crate::service::traits::i_service::{ConversionBackend, FileServiceTrait, NormalizerTrait};
use crate::utils::utils::display_name;

pub struct ConversionFacade {
    file_service: Box<dyn FileServiceTrait>,
    normalizer: Box<dyn NormalizerTrait>,
    word_to_pdf: BackendChain,
    pdf_to_word: BackendChain,
}

impl ConversionFacade {
    pub fn new(
        file_service: Box<dyn FileServiceTrait>,
        normalizer: Box<dyn NormalizerTrait>,
        word_to_pdf: BackendChain,
        pdf_to_word: BackendChain,
    ) -> Self {
        ConversionFacade {
            file_service,
            normalizer,
            word_to_pdf,
            pdf_to_word,
        }
    }

    /// 依探測結果組裝各方向的後端順序
    pub fn from_capabilities(capabilities: &Capabilities) -> Self {
        let suite = || -> Box<dyn ConversionBackend> {
            Box::new(HeadlessSuiteBackend::new(capabilities.suite.clone()))
        };
        let word = || -> Box<dyn ConversionBackend> {
            Box::new(WordAutomationBackend::new(Box::new(PowerShellWordHost::new(
                capabilities.word_automation.clone(),
            ))))
        };

        let word_to_pdf = BackendChain::new(vec![
            suite(),
            Box::new(Docx2PdfBackend::new(capabilities.docx2pdf.clone())),
            word(),
        ]);
        let pdf_to_word = BackendChain::new(vec![Box::new(Pdf2DocxBackend::new(
            capabilities.pdf2docx.clone(),
        ))]);
        let normalizer = LegacyNormalizer::new(BackendChain::new(vec![suite(), word()]));

        ConversionFacade::new(
            Box::new(FileService::new()),
            Box::new(normalizer),
            word_to_pdf,
            pdf_to_word,
        )
    }

    fn chain(&self, direction: Direction) -> &BackendChain {
        match direction {
            Direction::WordToPdf => &self.word_to_pdf,
            Direction::PdfToWord => &self.pdf_to_word,
        }
    }

    /// 該方向完全沒有可用工具時，在任何檔案操作之前中止
    fn ensure_backend(&self, direction: Direction) -> Result<()> {
        let chain = self.chain(direction);
        if chain.any_available() {
            return Ok(());
        }
        let message = chain.unavailable_message(direction.label());
        error!("{}", message);
        Err(ConvertError::BackendUnavailable(message))
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(&self, input: ConversionInput) -> Result<ConversionOutput> {
        let result = match input.scope {
            ConversionScope::Directory => {
                info!("開始目錄轉換（{}）：{}", input.direction.label(), input.path.display());
                self.process_directory(&input.path, input.direction, input.delegate_batch)?
            }
            ConversionScope::SingleFile => {
                info!("開始單一檔案轉換（{}）：{}", input.direction.label(), input.path.display());
                self.process_single(&input.path, input.direction)?
            }
        };
        Ok(ConversionOutput { result })
    }
}

impl ConversionFacade {
    fn process_directory(
        &self,
        dir: &Path,
        direction: Direction,
        delegate_batch: bool,
    ) -> Result<BatchResult> {
        self.ensure_backend(direction)?;

        let files = self
            .file_service
            .discover(dir, direction.accepted_extensions())?;
        let output_dir = output_dir_for(dir, direction);
        if files.is_empty() {
            println!("找不到可轉換的 {} 檔案。", direction.extensions_text());
            return Ok(BatchResult::new(0, output_dir));
        }

        self.file_service.ensure_dir(&output_dir)?;

        let delegated = if delegate_batch && direction == Direction::WordToPdf {
            self.delegate_batch(dir, &output_dir, &files)
        } else {
            None
        };

        let result = match delegated {
            Some(result) => result,
            None => {
                let mut result = BatchResult::new(files.len(), output_dir);
                for file in files {
                    let job = ConversionJob::new(file, direction, JobOrigin::Batch);
                    result.record(self.run_job(&job));
                }
                result
            }
        };

        println!("{}", result.summary(direction));
        info!("批次轉換結束：成功 {}，失敗 {}", result.converted, result.failed());
        Ok(result)
    }

    fn process_single(&self, file: &Path, direction: Direction) -> Result<BatchResult> {
        validate_file_path(file, direction)?;
        self.ensure_backend(direction)?;

        let job = ConversionJob::new(file, direction, JobOrigin::Standalone);
        let mut result = BatchResult::new(1, job.output_location().dir);
        result.record(self.run_job(&job));
        Ok(result)
    }

    /// 執行單一工作並立即輸出結果；錯誤在此攔截，不影響其他檔案
    fn run_job(&self, job: &ConversionJob) -> bool {
        match self.convert_job(job) {
            Ok((backend, target)) => {
                println!(
                    "已轉換（{}）：{} -> {}",
                    backend,
                    job.file_name(),
                    display_name(&target)
                );
                true
            }
            Err(e) => {
                error!("轉換 {} 失敗（{:?}）：{}", job.source().display(), job.origin(), e);
                println!("轉換失敗 {}：{}", job.file_name(), e);
                false
            }
        }
    }

    fn convert_job(&self, job: &ConversionJob) -> Result<(BackendKind, PathBuf)> {
        let location = job.output_location();
        self.file_service.ensure_dir(&location.dir)?;

        // 舊版 .doc 先在同一個輸出目錄中轉成 .docx
        let source = if job.is_legacy() {
            self.normalizer.normalize(job.source(), &location.dir)?
        } else {
            job.source().to_path_buf()
        };

        let file_name = job.file_name();
        let backend = self.chain(job.direction()).run(
            &source,
            &location.target,
            job.direction().target_format(),
            |attempt, has_next| {
                if let (Some(err), true) = (&attempt.error, has_next) {
                    println!("{} 無法轉換 {}：{}，嘗試下一個轉換工具...", attempt.backend, file_name, err);
                }
            },
        )?;
        Ok((backend, location.target))
    }

    /// 沒有 LibreOffice 且全部為 .docx 時，整個目錄交給 docx2pdf 一次處理；
    /// 條件不符或批次呼叫失敗時返回 None，改為逐檔轉換
    fn delegate_batch(&self, dir: &Path, output_dir: &Path, files: &[PathBuf]) -> Option<BatchResult> {
        let chain = &self.word_to_pdf;
        if chain.is_available(BackendKind::HeadlessSuite) {
            return None;
        }
        if files.iter().any(|file| is_legacy_word(file)) {
            info!("目錄中含有 .doc 檔案，改為逐檔轉換");
            return None;
        }
        let library = chain.find_available(BackendKind::WordToPdfLibrary)?;

        for file in files {
            if let Err(e) = remove_stale_output(&target_in(output_dir, file, TargetFormat::Pdf)) {
                warn!("無法清除舊的輸出檔：{}，改為逐檔轉換", e);
                return None;
            }
        }

        if let Err(e) = library.try_convert_dir(dir, output_dir) {
            warn!("{} 批次轉換失敗：{}，改為逐檔轉換", library.kind(), e);
            return None;
        }

        let mut result = BatchResult::new(files.len(), output_dir.to_path_buf());
        for file in files {
            let target = target_in(output_dir, file, TargetFormat::Pdf);
            let name = display_name(file);
            if target.exists() {
                println!("已轉換（{}）：{} -> {}", library.kind(), name, target.display());
                result.record(true);
            } else {
                println!("轉換失敗 {}：批次轉換未產生 {}", name, target.display());
                result.record(false);
            }
        }
        Some(result)
    }
}

/// 以探測到的外部工具執行配置指定的轉換
pub struct ConversionAdapter;

impl ConversionPort for ConversionAdapter {
    fn execute(&self, config: AppConfig) -> Result<ConversionOutput> {
        let capabilities = Capabilities::probe(config.soffice.as_deref());
        debug!("偵測到的轉換工具：{:?}", capabilities);

        let direction = config.mode.direction();
        if direction == Direction::WordToPdf
            && capabilities.can_convert(direction)
            && !capabilities.can_normalize()
        {
            warn!("找不到 LibreOffice 或 Microsoft Word，.doc 檔案將無法轉換");
        }

        let facade = ConversionFacade::from_capabilities(&capabilities);
        facade.execute_conversion(config.conversion_input())
    }
}
