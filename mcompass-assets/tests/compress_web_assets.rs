use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use mcompass_assets::compress::compress_folder;

/// Files of a typical static web export, relative to the `_next` folder.
const TREE: &[(&str, &str)] = &[
    ("static/chunks/main.js", "console.log('compass');"),
    ("static/chunks/pages/wifi.js", "export default {};"),
    ("static/css/app.css", "body { margin: 0; }"),
    ("static/media/font.woff2.gz", "already compressed"),
    ("build-manifest.json", "{}"),
];

fn read_gz(path: &Path) -> String {
    let mut text = String::new();
    GzDecoder::new(File::open(path).unwrap())
        .read_to_string(&mut text)
        .unwrap();
    text
}

#[test]
fn compresses_nested_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("_next");
    for (path, content) in TREE {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    let report = compress_folder(&root).unwrap();
    assert_eq!(report.compressed.len(), 4);
    assert_eq!(
        report.skipped,
        vec![root.join("static/media/font.woff2.gz")]
    );

    for (path, content) in TREE {
        let path = root.join(path);
        if path.extension().map_or(false, |ext| ext == "gz") {
            assert_eq!(fs::read_to_string(&path).unwrap(), *content);
            continue;
        }
        assert!(!path.exists(), "{} was not removed", path.display());
        let mut gz_path = path.into_os_string();
        gz_path.push(".gz");
        assert_eq!(read_gz(Path::new(&gz_path)), *content);
    }
}

#[test]
fn second_run_only_skips() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<html></html>").unwrap();

    let first = compress_folder(dir.path()).unwrap();
    assert_eq!(first.compressed.len(), 1);
    assert!(first.skipped.is_empty());

    let second = compress_folder(dir.path()).unwrap();
    assert!(second.compressed.is_empty());
    assert_eq!(second.skipped, vec![dir.path().join("index.html.gz")]);
}
