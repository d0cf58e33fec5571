use std::cell::RefCell;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use word_pdf_convert::error::{ConvertError, Result};
use word_pdf_convert::facade::conversion_facade::ConversionFacade;
use word_pdf_convert::facade::traits::i_conversion::ConversionFacadeTrait;
use word_pdf_convert::models::backend::{BackendKind, TargetFormat};
use word_pdf_convert::models::conversion::{ConversionInput, ConversionScope, Direction};
use word_pdf_convert::service::backends::BackendChain;
use word_pdf_convert::service::file::FileService;
use word_pdf_convert::service::normalize::LegacyNormalizer;
use word_pdf_convert::service::traits::i_service::ConversionBackend;

/// 依檔名決定成敗的測試用後端，並記錄收到的來源檔案
struct ScriptedBackend {
    kind: BackendKind,
    available: bool,
    fail_on: Vec<&'static str>,
    seen: Rc<RefCell<Vec<String>>>,
}

impl ScriptedBackend {
    fn new(kind: BackendKind, available: bool, fail_on: Vec<&'static str>) -> (Self, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let backend = ScriptedBackend {
            kind,
            available,
            fail_on,
            seen: Rc::clone(&seen),
        };
        (backend, seen)
    }
}

impl ConversionBackend for ScriptedBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn try_convert(&self, source: &Path, target: &Path, _format: TargetFormat) -> Result<()> {
        let name = source.file_name().unwrap().to_string_lossy().to_string();
        self.seen.borrow_mut().push(name.clone());
        if self.fail_on.iter().any(|f| name.starts_with(f)) {
            return Err(ConvertError::conversion(self.kind.display_name(), "scripted failure"));
        }
        fs::write(target, b"converted")?;
        Ok(())
    }
}

fn chain(backends: Vec<ScriptedBackend>) -> BackendChain {
    BackendChain::new(
        backends
            .into_iter()
            .map(|b| Box::new(b) as Box<dyn ConversionBackend>)
            .collect(),
    )
}

fn facade(
    word_to_pdf: Vec<ScriptedBackend>,
    normalizers: Vec<ScriptedBackend>,
    pdf_to_word: Vec<ScriptedBackend>,
) -> ConversionFacade {
    ConversionFacade::new(
        Box::new(FileService::new()),
        Box::new(LegacyNormalizer::new(chain(normalizers))),
        chain(word_to_pdf),
        chain(pdf_to_word),
    )
}

fn input(path: &Path, direction: Direction, scope: ConversionScope) -> ConversionInput {
    ConversionInput {
        path: path.to_path_buf(),
        direction,
        scope,
        delegate_batch: false,
    }
}

fn touch(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            File::create(&path).unwrap();
            path
        })
        .collect()
}

#[test]
fn word_directory_with_mixed_files() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &["a.docx", "b.doc", "notes.txt"]);

    let (suite, seen) = ScriptedBackend::new(BackendKind::HeadlessSuite, true, vec![]);
    let (norm, normalized) = ScriptedBackend::new(BackendKind::HeadlessSuite, true, vec![]);
    let output = facade(vec![suite], vec![norm], vec![])
        .execute_conversion(input(dir.path(), Direction::WordToPdf, ConversionScope::Directory))
        .unwrap();

    assert_eq!((output.result.converted, output.result.total), (2, 2));
    assert_eq!(output.result.output_dir, dir.path().join("convert_pdfs"));
    // .doc 先正規化，再以產生的 .docx 轉 PDF
    assert_eq!(*normalized.borrow(), vec!["b.doc".to_string()]);
    assert_eq!(*seen.borrow(), vec!["a.docx".to_string(), "b.docx".to_string()]);
    assert!(!dir.path().join("convert_pdfs").join("notes.pdf").exists());
}

#[test]
fn one_failure_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &["1.docx", "2.docx", "3.docx"]);

    let (suite, _) = ScriptedBackend::new(BackendKind::HeadlessSuite, true, vec!["2"]);
    let (library, _) = ScriptedBackend::new(BackendKind::WordToPdfLibrary, true, vec!["2"]);
    let output = facade(vec![suite, library], vec![], vec![])
        .execute_conversion(input(dir.path(), Direction::WordToPdf, ConversionScope::Directory))
        .unwrap();

    assert_eq!((output.result.converted, output.result.total), (2, 3));
    let out = dir.path().join("convert_pdfs");
    assert!(out.join("1.pdf").exists());
    assert!(!out.join("2.pdf").exists());
    assert!(out.join("3.pdf").exists());
}

#[test]
fn empty_directory_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &["readme.md"]);

    let (library, _) = ScriptedBackend::new(BackendKind::PdfToWordLibrary, true, vec![]);
    let output = facade(vec![], vec![], vec![library])
        .execute_conversion(input(dir.path(), Direction::PdfToWord, ConversionScope::Directory))
        .unwrap();

    assert_eq!((output.result.converted, output.result.total), (0, 0));
    assert!(!dir.path().join("convert_words").exists());
}

#[test]
fn single_pdf_without_library_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let files = touch(dir.path(), &["report.pdf"]);

    let (library, seen) = ScriptedBackend::new(BackendKind::PdfToWordLibrary, false, vec![]);
    let err = facade(vec![], vec![], vec![library])
        .execute_conversion(input(&files[0], Direction::PdfToWord, ConversionScope::SingleFile))
        .unwrap_err();

    assert!(matches!(err, ConvertError::BackendUnavailable(_)));
    assert!(err.to_string().contains("pdf2docx"));
    assert!(seen.borrow().is_empty());
    assert!(!dir.path().join("convert_words").exists());
}

#[test]
fn single_pdf_lands_next_to_source() {
    let dir = tempfile::tempdir().unwrap();
    let files = touch(dir.path(), &["Report.PDF"]);

    let (library, _) = ScriptedBackend::new(BackendKind::PdfToWordLibrary, true, vec![]);
    let output = facade(vec![], vec![], vec![library])
        .execute_conversion(input(&files[0], Direction::PdfToWord, ConversionScope::SingleFile))
        .unwrap();

    assert_eq!((output.result.converted, output.result.total), (1, 1));
    assert!(dir.path().join("convert_words").join("Report.docx").exists());
}

#[test]
fn legacy_file_without_normalizer_counts_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &["a.docx", "old.doc"]);

    let (library, seen) = ScriptedBackend::new(BackendKind::WordToPdfLibrary, true, vec![]);
    let (suite, _) = ScriptedBackend::new(BackendKind::HeadlessSuite, false, vec![]);
    let output = facade(vec![library], vec![suite], vec![])
        .execute_conversion(input(dir.path(), Direction::WordToPdf, ConversionScope::Directory))
        .unwrap();

    assert_eq!((output.result.converted, output.result.total), (1, 2));
    assert_eq!(*seen.borrow(), vec!["a.docx".to_string()]);
}

#[test]
fn falls_back_to_next_backend() {
    let dir = tempfile::tempdir().unwrap();
    let files = touch(dir.path(), &["x.docx"]);

    let (first, first_seen) = ScriptedBackend::new(BackendKind::HeadlessSuite, true, vec!["x"]);
    let (second, second_seen) = ScriptedBackend::new(BackendKind::WordToPdfLibrary, true, vec![]);
    let output = facade(vec![first, second], vec![], vec![])
        .execute_conversion(input(&files[0], Direction::WordToPdf, ConversionScope::SingleFile))
        .unwrap();

    assert_eq!(output.result.converted, 1);
    assert_eq!(first_seen.borrow().len(), 1);
    assert_eq!(second_seen.borrow().len(), 1);
    assert!(dir.path().join("convert_pdfs").join("x.pdf").exists());
}

#[test]
fn single_file_with_wrong_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let files = touch(dir.path(), &["notes.txt"]);

    let (suite, seen) = ScriptedBackend::new(BackendKind::HeadlessSuite, true, vec![]);
    let err = facade(vec![suite], vec![], vec![])
        .execute_conversion(input(&files[0], Direction::WordToPdf, ConversionScope::SingleFile))
        .unwrap_err();

    assert!(err.is_input_error());
    assert!(seen.borrow().is_empty());
}
