use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use scrcmd_xlsx::{ScrcmdXlsxError, SpecWorkbookOptions, generate_workbook};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let n = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("scrcmd_xlsx_it_{tag}_{n}"));
        fs::create_dir_all(&path).expect("create test dir");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, name: &str, text: &str) {
        fs::write(self.path.join(name), text).expect("write fixture");
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

const C_STYLES: &str = r#"{
    "header": {
        "1": {"value": "Code", "font": {"name": "Arial", "size": 12, "bold": true},
              "fill": {"fg": "FF1F4E78"}, "align": {"wrap": true, "vert": "center"}},
        "5": {"value": "Description"}
    },
    "data": {
        "4": {"font": {"name": "Consolas", "size": 10}, "align": {"wrap": true}},
        "5": {"align": {"wrap": true, "vert": "top"}}
    },
    "widths": {"1": 8, "2": 28, "3": 22, "4": 40, "5": 80}
}"#;

fn options_for(dir: &Path) -> SpecWorkbookOptions {
    SpecWorkbookOptions {
        dir_sources: dir.to_path_buf(),
        path_file_styles: dir.join("styles.json"),
        path_file_out: dir.join("scrcmd_commands.xlsx"),
        ..Default::default()
    }
}

#[test]
fn generate_workbook_writes_one_sheet_per_source() {
    let tmp = TestDir::new("ok");
    tmp.write("styles.json", C_STYLES);
    tmp.write(
        "diamond_pearl_scrcmd_database.json",
        r#"{"scrcmd": {
            "0x0": {"decomp_name": "ScrCmd_Nop", "name": "Nop",
                    "parameter_values": [], "description": ""},
            "0x2A": {"decomp_name": "ScrCmd_GiveItem", "name": "GiveItem",
                     "parameter_values": ["u16:item index", "u16:count", "var"],
                     "description": "Gives count of item index to the player."}
        }}"#,
    );
    tmp.write(
        "foo_scrcmd_database.json",
        r#"{"scrcmd": {"0x1": {"name": "End", "description": "Ends the script."}}}"#,
    );
    tmp.write("notes.json", r#"{"scrcmd": {}}"#);

    let options = options_for(tmp.path());
    let report = generate_workbook(&options).expect("generate workbook");

    let l_names: Vec<&str> = report.sheets.iter().map(|s| s.sheet_name.as_str()).collect();
    assert_eq!(l_names, vec!["DP", "FOO"]);
    assert_eq!(report.sheets[0].cnt_rows, 2);
    // Parameters and description of 0x2A.
    assert_eq!(report.sheets[0].cnt_cells_rich, 2);
    assert_eq!(report.sheets[1].cnt_rows, 1);
    assert_eq!(report.row_count(), 3);
    assert_eq!(report.warning_count(), 0);
    assert_eq!(report.path_file_out, options.path_file_out);

    let v_bytes = fs::read(&options.path_file_out).expect("read workbook");
    assert!(v_bytes.starts_with(b"PK"));
    assert!(report.to_string().starts_with("[XLSX] file="));
}

#[test]
fn generate_workbook_without_sources_fails() {
    let tmp = TestDir::new("empty");
    tmp.write("styles.json", C_STYLES);

    let options = options_for(tmp.path());
    let err = generate_workbook(&options).expect_err("no sources");
    assert!(matches!(err, ScrcmdXlsxError::NoSources { .. }));
    assert!(!options.path_file_out.exists());
}

#[test]
fn generate_workbook_without_styles_fails() {
    let tmp = TestDir::new("nostyle");
    tmp.write(
        "hgss_scrcmd_database.json",
        r#"{"scrcmd": {"0x2": {"name": "Return"}}}"#,
    );

    let options = options_for(tmp.path());
    let err = generate_workbook(&options).expect_err("missing styles");
    assert!(matches!(err, ScrcmdXlsxError::Io { .. }));
    assert!(!options.path_file_out.exists());
}

#[test]
fn generate_workbook_rejects_source_without_command_table() {
    let tmp = TestDir::new("badsrc");
    tmp.write("styles.json", C_STYLES);
    tmp.write("platinum_scrcmd_database.json", r#"{"commands": {}}"#);

    let err = generate_workbook(&options_for(tmp.path())).expect_err("bad source");
    assert!(matches!(err, ScrcmdXlsxError::MissingCommandTable { .. }));
}
