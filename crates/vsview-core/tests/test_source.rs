use vsview_core::error::ViewerError;
use vsview_core::io::fs::{file_extension, file_name, is_archive};
use vsview_core::source::SourceSet;

// ---------------------------------------------------------------------------
// File name helpers
// ---------------------------------------------------------------------------

#[test]
fn test_archive_extensions() {
    for ext in ["zip", "7z", "rar", "cbz", "cbr", "CBZ"] {
        assert!(is_archive(ext), "{ext}");
    }
    for ext in ["png", "jpg", "", "zi", "cbzx"] {
        assert!(!is_archive(ext), "{ext}");
    }
}

#[test]
fn test_file_name_and_extension() {
    let path = std::path::Path::new("/comics/vol1/page.01.png");
    assert_eq!(file_name(path), "page.01.png");
    assert_eq!(file_extension(path), "png");
    assert_eq!(file_extension(std::path::Path::new("/comics/.hidden")), "");
    assert_eq!(file_extension(std::path::Path::new("noext")), "");
}

// ---------------------------------------------------------------------------
// SourceSet
// ---------------------------------------------------------------------------

#[test]
fn test_classify_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SourceSet::classify(&dir.path().join("missing.png")).unwrap_err();
    assert!(matches!(err, ViewerError::NotFound(_)));
}

#[test]
fn test_classify_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("page.png");
    let archive = dir.path().join("vol1.cbz");
    std::fs::write(&image, b"png").unwrap();
    std::fs::write(&archive, b"zip").unwrap();

    assert_eq!(
        SourceSet::classify(&image).unwrap(),
        SourceSet::SingleFile(image.clone())
    );
    assert_eq!(
        SourceSet::classify(&archive).unwrap(),
        SourceSet::Archive(archive.clone())
    );
    assert_eq!(
        SourceSet::classify(dir.path()).unwrap(),
        SourceSet::Folder(dir.path().to_path_buf())
    );
    assert_eq!(SourceSet::classify(&image).unwrap().len(), 1);
    assert!(SourceSet::classify(&archive).unwrap().is_empty());
}

#[test]
fn test_stage_copies_and_cleans_up() {
    let src_dir = tempfile::tempdir().unwrap();
    let temp_dir = tempfile::tempdir().unwrap();
    let image = src_dir.path().join("page.png");
    std::fs::write(&image, b"pixels").unwrap();

    let source = SourceSet::classify(&image).unwrap();
    let staged = source.stage(0, Some(temp_dir.path())).unwrap();
    let staged_path = staged.path().to_path_buf();

    assert!(staged_path.is_absolute());
    assert_eq!(staged_path.file_name().unwrap(), "page.png");
    assert_eq!(std::fs::read(&staged_path).unwrap(), b"pixels");

    drop(staged);
    assert!(!staged_path.exists());
    assert!(!staged_path.parent().unwrap().exists());
    assert!(image.exists(), "original must survive");
}

#[test]
fn test_stage_same_name_sessions_are_isolated() {
    let first_dir = tempfile::tempdir().unwrap();
    let second_dir = tempfile::tempdir().unwrap();
    let temp_dir = tempfile::tempdir().unwrap();
    let first = first_dir.path().join("page.png");
    let second = second_dir.path().join("page.png");
    std::fs::write(&first, b"first").unwrap();
    std::fs::write(&second, b"second").unwrap();

    let staged_first = SourceSet::classify(&first)
        .unwrap()
        .stage(0, Some(temp_dir.path()))
        .unwrap();
    let staged_second = SourceSet::classify(&second)
        .unwrap()
        .stage(0, Some(temp_dir.path()))
        .unwrap();

    assert_ne!(staged_first.path(), staged_second.path());
    assert_eq!(std::fs::read(staged_first.path()).unwrap(), b"first");
    assert_eq!(std::fs::read(staged_second.path()).unwrap(), b"second");

    let second_path = staged_second.path().to_path_buf();
    drop(staged_first);
    assert_eq!(std::fs::read(&second_path).unwrap(), b"second");
    drop(staged_second);
    assert!(!second_path.exists());
}

#[test]
fn test_stage_without_temp_dir_uses_original() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("page.png");
    std::fs::write(&image, b"pixels").unwrap();

    let staged = SourceSet::classify(&image).unwrap().stage(0, None).unwrap();
    assert_eq!(staged.path(), std::path::absolute(&image).unwrap());
    drop(staged);
    assert!(image.exists());
}

#[test]
fn test_stage_inside_temp_dir_keeps_file() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("page.png");
    std::fs::write(&image, b"pixels").unwrap();

    let staged = SourceSet::classify(&image)
        .unwrap()
        .stage(0, Some(dir.path()))
        .unwrap();
    drop(staged);
    assert_eq!(std::fs::read(&image).unwrap(), b"pixels");
}

#[test]
fn test_stage_archive_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("vol1.cbr");
    std::fs::write(&archive, b"rar").unwrap();
    let err = SourceSet::classify(&archive)
        .unwrap()
        .stage(0, None)
        .unwrap_err();
    assert!(matches!(err, ViewerError::UnsupportedSource(_)));
}

#[test]
fn test_stage_single_file_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("page.png");
    std::fs::write(&image, b"pixels").unwrap();
    let err = SourceSet::classify(&image).unwrap().stage(1, None).unwrap_err();
    assert!(matches!(err, ViewerError::UnsupportedSource(_)));
}
