//! End-to-end import of a quote-grab dump through the library API

use std::fs;
use std::path::PathBuf;

use applets::quotegrabs::{import, parse_timestamp, ImportConfig, ImportSummary};
use pretty_assertions::assert_eq;

const DUMP: &str = r#"<!DOCTYPE html>
<html><body>
<h3>#c</h3>
<table>
<tr><th>id</th><th>author(s)</th><th>quote</th><th>date</th><th>grabbed by</th></tr>
<tr><td>1</td><td>alice, bob</td><td>&lt;alice&gt; hi   &lt;bob&gt; hello</td><td>2020/01/15 Wed 12:00:00</td><td>carol</td></tr>
<tr><td>2</td><td>dave</td><td>* dave waves, "hi"</td><td>2020/01/15 Wed 13:00:00</td><td>erin</td></tr>
</table>
</body></html>"#;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("applets-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_import_writes_one_record_per_grab() {
    let dir = scratch_dir("import");
    let config = ImportConfig {
        input: dir.join("quotegrabs.html"),
        output: dir.join("quotes.csv"),
    };
    fs::write(&config.input, DUMP).unwrap();

    let summary = import(&config).unwrap();
    assert_eq!(
        summary,
        ImportSummary {
            channels: 1,
            written: 2,
            skipped: 1,
        }
    );

    let noon = parse_timestamp("2020/01/15 Wed 12:00:00").unwrap();
    let csv = fs::read_to_string(&config.output).unwrap();
    assert_eq!(
        csv,
        format!(
            "1,alice+bob,#c,carol,hi   <bob> hello,{}.0\r\n2,dave,#c,erin,\"/me waves, \"\"hi\"\"\",{}.0\r\n",
            noon,
            noon + 3600
        )
    );

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = scratch_dir("missing");
    let config = ImportConfig {
        input: dir.join("absent.html"),
        output: dir.join("quotes.csv"),
    };

    assert!(import(&config).is_err());
    assert!(!config.output.exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_default_paths() {
    let config = ImportConfig::default();
    assert_eq!(config.input, PathBuf::from("quotegrabs.html"));
    assert_eq!(config.output, PathBuf::from("quotes.csv"));
}
