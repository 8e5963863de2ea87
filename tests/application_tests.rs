//! Application layer tests
//!
//! End-to-end runs of the strip use case over files and directories.

use romsplit::application::ProgressCallback;
use romsplit::{
    FileStatus, HeaderFormat, HeaderSniffer, LocalSplitWriter, SignatureRegistry,
    StripError, StripHeadersUseCase, StripOptions,
};
use rstest::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

// ============================================================================
// Fixtures
// ============================================================================

#[fixture]
fn use_case() -> StripHeadersUseCase<LocalSplitWriter> {
    StripHeadersUseCase::new(SignatureRegistry::console_headers(), LocalSplitWriter::new())
}

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 200) as u8 + 0x20).collect()
}

fn nes_image() -> Vec<u8> {
    let mut data = b"NES\x1A\x02\x01\x00\x00".to_vec();
    data.extend_from_slice(&[0x01; 8]);
    data.extend(payload(2000));
    data
}

fn lynx_image() -> Vec<u8> {
    let mut data = b"LYNX".to_vec();
    data.extend_from_slice(&[0x01; 60]);
    data.extend(payload(700));
    data
}

fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", path.display(), suffix))
}

/// A directory with two headered images, one plain file, one truncated
/// image and a subdirectory that must not be visited
#[fixture]
fn rom_directory() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a_game.nes", &nes_image());
    write_file(dir.path(), "b_game.lnx", &lynx_image());
    write_file(dir.path(), "c_notes.txt", b"plain text, nothing to strip here");
    write_file(dir.path(), "d_short.lnx", b"LYNX but far too short");

    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    write_file(&nested, "inner.nes", &nes_image());
    dir
}

// ============================================================================
// Single File Tests
// ============================================================================

#[rstest]
fn test_single_file_with_header(use_case: StripHeadersUseCase<LocalSplitWriter>) {
    let dir = TempDir::new().unwrap();
    let data = nes_image();
    let path = write_file(dir.path(), "game.nes", &data);

    let report = use_case
        .process(&path, &StripOptions::new(true), None)
        .unwrap();

    assert_eq!(report.scanned(), 1);
    assert_eq!(report.stripped(), 1);
    let outcome = &report.outcomes[0];
    assert_eq!(outcome.format(), Some(HeaderFormat::Nes));
    assert!(matches!(
        outcome.status,
        FileStatus::Stripped {
            header_length: 16,
            payload_bytes: 2000,
            ..
        }
    ));
    assert_eq!(outcome.header_file(), Some(with_suffix(&path, ".header").as_path()));
    assert_eq!(fs::read(with_suffix(&path, ".new")).unwrap(), &data[16..]);
}

#[rstest]
fn test_single_file_without_header(use_case: StripHeadersUseCase<LocalSplitWriter>) {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "plain.bin", &payload(4096));

    let report = use_case
        .process(&path, &StripOptions::new(true), None)
        .unwrap();

    let outcome = &report.outcomes[0];
    assert!(!outcome.is_detected());
    assert!(matches!(outcome.status, FileStatus::NoHeader));
    assert!(!with_suffix(&path, ".header").exists());
    assert!(!with_suffix(&path, ".new").exists());
    assert_eq!(report.detected(), 0);
}

#[rstest]
fn test_empty_file_has_no_header(use_case: StripHeadersUseCase<LocalSplitWriter>) {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "empty.bin", &[]);

    let outcome = use_case.process_file(&path, &StripOptions::default());
    assert!(matches!(outcome.status, FileStatus::NoHeader));
}

#[rstest]
fn test_stripped_output_reprobes_as_plain(use_case: StripHeadersUseCase<LocalSplitWriter>) {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "game.nes", &nes_image());

    use_case.process_file(&path, &StripOptions::default());
    let stripped = fs::read(with_suffix(&path, ".new")).unwrap();

    let result = HeaderSniffer::new(use_case.registry()).probe(&stripped);
    assert!(!result.is_detected());

    let again = use_case.process_file(&with_suffix(&path, ".new"), &StripOptions::default());
    assert!(matches!(again.status, FileStatus::NoHeader));
}

#[rstest]
fn test_a7800_trailer_file(use_case: StripHeadersUseCase<LocalSplitWriter>) {
    let dir = TempDir::new().unwrap();
    let mut data = vec![0x01; 128];
    data[100..128].copy_from_slice(b"ACTUAL CART DATA STARTS HERE");
    data.extend(payload(1000));
    let path = write_file(dir.path(), "game.a78", &data);

    let outcome = use_case.process_file(&path, &StripOptions::new(true));

    assert_eq!(outcome.format(), Some(HeaderFormat::A7800));
    assert_eq!(fs::read(with_suffix(&path, ".header")).unwrap(), &data[..128]);
    assert_eq!(fs::read(with_suffix(&path, ".new")).unwrap(), &data[128..]);
}

#[rstest]
fn test_header_too_large_fails_file(use_case: StripHeadersUseCase<LocalSplitWriter>) {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "short.lnx", b"LYNX");

    let outcome = use_case.process_file(&path, &StripOptions::new(true));

    assert!(outcome.is_failed());
    assert_eq!(outcome.format(), Some(HeaderFormat::Lynx));
    assert!(matches!(
        outcome.errors(),
        [StripError::HeaderTooLarge {
            header_length: 64,
            file_length: 4
        }]
    ));
    assert!(!with_suffix(&path, ".new").exists());
}

#[rstest]
fn test_missing_file_fails_without_format(use_case: StripHeadersUseCase<LocalSplitWriter>) {
    let dir = TempDir::new().unwrap();
    let outcome = use_case.process_file(&dir.path().join("gone.nes"), &StripOptions::default());

    assert!(outcome.is_failed());
    assert_eq!(outcome.format(), None);
    assert!(matches!(outcome.errors(), [StripError::Io { .. }]));
}

#[rstest]
fn test_partial_output_is_reported(use_case: StripHeadersUseCase<LocalSplitWriter>) {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "game.nes", &nes_image());
    fs::create_dir(with_suffix(&path, ".new")).unwrap();

    let outcome = use_case.process_file(&path, &StripOptions::new(true));

    assert!(outcome.is_failed());
    assert_eq!(outcome.format(), Some(HeaderFormat::Nes));
    assert!(outcome.header_file().is_some());
    assert!(outcome.payload_file().is_none());
    assert_eq!(outcome.errors().len(), 1);
}

// ============================================================================
// Directory Tests
// ============================================================================

#[rstest]
fn test_directory_batch(use_case: StripHeadersUseCase<LocalSplitWriter>, rom_directory: TempDir) {
    let report = use_case
        .process(rom_directory.path(), &StripOptions::new(true), None)
        .unwrap();

    let names: Vec<String> = report
        .outcomes
        .iter()
        .map(|o| o.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a_game.nes", "b_game.lnx", "c_notes.txt", "d_short.lnx"]);

    let formats: Vec<Option<HeaderFormat>> = report.outcomes.iter().map(|o| o.format()).collect();
    assert_eq!(
        formats,
        vec![
            Some(HeaderFormat::Nes),
            Some(HeaderFormat::Lynx),
            None,
            Some(HeaderFormat::Lynx)
        ]
    );

    assert_eq!(report.scanned(), 4);
    assert_eq!(report.detected(), 3);
    assert_eq!(report.stripped(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.payload_bytes(), 2000 + 700);

    let root = rom_directory.path();
    assert!(root.join("a_game.nes.header").exists());
    assert!(root.join("b_game.lnx.new").exists());
    assert!(!root.join("c_notes.txt.new").exists());
    assert!(!root.join("d_short.lnx.new").exists());
    assert!(!root.join("nested").join("inner.nes.new").exists());
}

#[rstest]
fn test_parallel_batch_matches_sequential(
    #[from(rom_directory)] first_directory: TempDir,
    #[from(rom_directory)] twin_directory: TempDir,
) {
    let run = |dir: &Path, options: StripOptions| {
        StripHeadersUseCase::new(SignatureRegistry::console_headers(), LocalSplitWriter::new())
            .process(dir, &options, None)
            .unwrap()
    };

    let sequential = run(first_directory.path(), StripOptions::new(true));
    let parallel = run(twin_directory.path(), StripOptions::new(true).parallel());

    assert_eq!(parallel.scanned(), sequential.scanned());
    for (seq, par) in sequential.outcomes.iter().zip(&parallel.outcomes) {
        assert_eq!(seq.path.file_name(), par.path.file_name());
        assert_eq!(seq.format(), par.format());
        assert_eq!(seq.is_failed(), par.is_failed());
    }

    let stripped = fs::read(twin_directory.path().join("a_game.nes.new")).unwrap();
    assert_eq!(stripped, &nes_image()[16..]);
}

#[rstest]
fn test_progress_called_per_file(use_case: StripHeadersUseCase<LocalSplitWriter>, rom_directory: TempDir) {
    let calls = AtomicUsize::new(0);
    let on_outcome = |_: &romsplit::FileOutcome| {
        calls.fetch_add(1, Ordering::Relaxed);
    };
    let callback: &ProgressCallback = &on_outcome;

    let report = use_case
        .process(rom_directory.path(), &StripOptions::default().parallel(), Some(callback))
        .unwrap();

    assert_eq!(calls.load(Ordering::Relaxed), report.scanned());
}

#[rstest]
fn test_empty_directory(use_case: StripHeadersUseCase<LocalSplitWriter>) {
    let dir = TempDir::new().unwrap();
    let report = use_case
        .process(dir.path(), &StripOptions::default(), None)
        .unwrap();

    assert_eq!(report.scanned(), 0);
    assert!(report.summary().starts_with("Scanned 0 file(s)"));
}

#[rstest]
fn test_invalid_path_is_usage_error(use_case: StripHeadersUseCase<LocalSplitWriter>) {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = use_case
        .process(&missing, &StripOptions::default(), None)
        .unwrap_err();

    assert!(err.is_usage());
    assert!(matches!(err, StripError::InvalidPath(p) if p == missing));
}

#[rstest]
fn test_summary_lists_formats(use_case: StripHeadersUseCase<LocalSplitWriter>, rom_directory: TempDir) {
    let report = use_case
        .process(rom_directory.path(), &StripOptions::default(), None)
        .unwrap();
    let summary = report.summary();

    assert!(summary.contains("3 with header"));
    assert!(summary.contains("  - nes: 1"));
    assert!(summary.contains("  - lynx: 2"));
    assert!(summary.contains("1 file(s) failed"));
}
