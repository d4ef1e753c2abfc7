//! File-level pipeline: source files on disk to written man and HTML pages.

use std::fs;

use roffdown::{Config, Error, ManPage, Outputs};
use tempfile::TempDir;

const RSYNC_MD: &str = "\
# NAME

rsync - a fast, versatile, remote (and local) file-copying tool

# SYNOPSIS

```
rsync [OPTION...] SRC... [DEST]
```

# OPTIONS

0.  `--verbose`, `-v`

    Increase verbosity. Installed in @BINDIR@.

0.  `--version`

    Print the version (@VERSION@) and exit.
";

fn config() -> Config {
    Config::from_json(
        r#"{
            "version": "3.2.3",
            "date": "06 Aug 2020",
            "substitutions": { "BINDIR": "/usr/bin" }
        }"#,
    )
    .unwrap()
}

#[test]
fn test_converts_source_file() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("rsync.1.md");
    fs::write(&source, RSYNC_MD).unwrap();

    let page = ManPage::load(&source, &config(), None).unwrap();
    page.write(Outputs::Both).unwrap();

    let man = fs::read_to_string(dir.path().join("rsync.1")).unwrap();
    assert!(man.starts_with(
        ".TH \"rsync\" \"1\" \"06 Aug 2020\" \"rsync 3.2.3\" \"User Commands\"\n.P\n.SH \"NAME\"\n"
    ));
    assert!(man.contains(".P\n.SH \"SYNOPSIS\"\n.P\n.nf\nrsync [OPTION...] SRC... [DEST]\n.fi\n"));
    assert!(man.contains(".IP \"\\fB--verbose\\fP, \\fB-v\\fP\"\nIncrease verbosity. Installed in /usr/bin.\n"));
    assert!(man.contains("Print the version (3.2.3) and exit.\n"));

    let html = fs::read_to_string(dir.path().join("rsync.1.html")).unwrap();
    assert!(html.contains("<title>rsync(1) man page</title>"));
    assert!(html.contains("<dt><code>--version</code></dt><dd>"));
    assert!(html.contains("<i>06 Aug 2020</i>"));
}

#[test]
fn test_malformed_description_list_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("bad.1.md");
    fs::write(&source, "# OPTIONS\n\n0. no label here\n").unwrap();

    let err = ManPage::load(&source, &Config::default(), None).unwrap_err();
    assert!(matches!(err, Error::MalformedDescriptionList(_)));
    assert!(!dir.path().join("bad.1").exists());
    assert!(!dir.path().join("bad.1.html").exists());
}

#[test]
fn test_invalid_input_name() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("notes.md");
    fs::write(&source, "text\n").unwrap();

    let err = ManPage::load(&source, &Config::default(), None).unwrap_err();
    assert!(matches!(err, Error::InvalidInputName(_)));
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ManPage::load(&dir.path().join("gone.1.md"), &Config::default(), None).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_html_only_into_dest() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let source = src.path().join("tool.5.md");
    fs::write(&source, "# NAME\n\ntool.conf\n").unwrap();

    let page = ManPage::load(&source, &Config::default(), Some(dest.path())).unwrap();
    page.write(Outputs::HtmlOnly).unwrap();

    assert!(dest.path().join("tool.5.html").exists());
    assert!(!dest.path().join("tool.5").exists());
}

#[test]
fn test_latin1_source_is_decoded() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("tool.1.md");
    fs::write(&source, b"caf\xe9\n").unwrap();

    let page = ManPage::load(&source, &Config::default(), None).unwrap();
    assert!(page.document.man.contains("\n.P\ncaf\u{e9}\n"));
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("man.json");
    fs::write(&path, r#"{"manual": "File Formats"}"#).unwrap();
    assert_eq!(
        Config::from_path(&path).unwrap().manual.as_deref(),
        Some("File Formats")
    );

    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(Config::from_path(&path).unwrap_err(), Error::Config(_)));
}
