use std::io::Cursor;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use predicates::prelude::*;

const LEDGER: &str = "\
ClientID,BranchID,BranchName,StateName,ClientName,AccountID,Total Cur.Inst.Due
100,7,Main,Karnataka,Asha,TW-9001,500
200,7,Main,Karnataka,Ravi,IGL-1,0
100,7,Main,Karnataka,Asha,TW-9002,300
";

const MOBILE: &str = "clientid,Mobile\n100,9998887776\n";

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn write_branch(&self, name: &str, rows: &[(&str, &str)]) -> PathBuf {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "OurBranchID").unwrap();
        sheet.write_string(0, 1, "Lang").unwrap();
        for (i, (id, lang)) in rows.iter().enumerate() {
            sheet.write_string(i as u32 + 1, 0, *id).unwrap();
            sheet.write_string(i as u32 + 1, 1, *lang).unwrap();
        }
        self.write(name, &workbook.save_to_buffer().unwrap())
    }

    /// Command isolated from the user's settings file.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("demand-extract").unwrap();
        cmd.env("HOME", self.dir.path());
        cmd
    }
}

fn read_sheet(path: &Path) -> Vec<Vec<Data>> {
    let bytes = std::fs::read(path).unwrap();
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    range.rows().map(|r| r.to_vec()).collect()
}

#[test]
fn run_writes_both_extracts() {
    let fx = Fixture::new();
    let ledger = fx.write("daily.csv", LEDGER.as_bytes());
    let branch = fx.write_branch("branch.xlsx", &[("0007", "en")]);
    let mobile = fx.write("mobile.csv", MOBILE.as_bytes());
    let out = fx.path("out");

    fx.cmd()
        .args(["run", "--date", "2025-03-01"])
        .arg("--ledger")
        .arg(&ledger)
        .arg("--branch")
        .arg(&branch)
        .arg("--mobile")
        .arg(&mobile)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("IGL Records: 0  |  TW Records: 1"))
        .stdout(predicate::str::contains("800.00"));

    let igl = read_sheet(&out.join("IGL.xlsx"));
    assert_eq!(igl.len(), 1);

    let tw = read_sheet(&out.join("TW.xlsx"));
    assert_eq!(tw.len(), 2);
    assert_eq!(tw[0][10], Data::String("tag5".to_string()));
    assert_eq!(tw[1][0], Data::String("0007".to_string()));
    assert_eq!(tw[1][3], Data::String("en".to_string()));
    assert_eq!(tw[1][6], Data::Float(9998887776.0));
    assert_eq!(tw[1][9], Data::Float(800.0));
    assert_eq!(tw[1][10], Data::Float(100.0));
    assert_eq!(tw[1][11], Data::String("TWL".to_string()));
}

#[test]
fn run_missing_column_writes_nothing() {
    let fx = Fixture::new();
    let ledger = fx.write(
        "daily.csv",
        b"ClientID,BranchID,BranchName,ClientName,AccountID,Total Cur.Inst.Due\n1,7,A,C,TW-1,5\n",
    );
    let branch = fx.write_branch("branch.xlsx", &[("0007", "en")]);
    let mobile = fx.write("mobile.csv", MOBILE.as_bytes());
    let out = fx.path("out");

    fx.cmd()
        .args(["run", "--date", "2025-03-01"])
        .arg("--ledger")
        .arg(&ledger)
        .arg("--branch")
        .arg(&branch)
        .arg("--mobile")
        .arg(&mobile)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing columns in Daily Collection: StateName"));

    assert!(!out.join("IGL.xlsx").exists());
    assert!(!out.join("TW.xlsx").exists());
}

#[test]
fn run_reject_policy_fails_on_duplicate_contacts() {
    let fx = Fixture::new();
    let ledger = fx.write("daily.csv", LEDGER.as_bytes());
    let branch = fx.write_branch("branch.xlsx", &[("0007", "en")]);
    let mobile = fx.write("mobile.csv", b"clientid,Mobile\n100,1\n100,2\n");

    fx.cmd()
        .args(["run", "--date", "2025-03-01", "--duplicate-keys", "reject"])
        .arg("--ledger")
        .arg(&ledger)
        .arg("--branch")
        .arg(&branch)
        .arg("--mobile")
        .arg(&mobile)
        .arg("--output-dir")
        .arg(fx.path("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate keys in mobile: 100"));
}

#[test]
fn run_rejects_bad_date() {
    let fx = Fixture::new();
    fx.cmd()
        .args([
            "run", "--ledger", "a.csv", "--branch", "b.xlsx", "--mobile", "c.csv", "--date",
            "03/01/2025",
        ])
        .assert()
        .failure();
}

#[test]
fn preview_reports_bad_file_and_continues() {
    let fx = Fixture::new();
    let ledger = fx.write("daily.csv", LEDGER.as_bytes());
    let branch = fx.write("branch.xlsx", b"not a workbook");
    let mobile = fx.write("mobile.csv", MOBILE.as_bytes());

    fx.cmd()
        .arg("preview")
        .arg("--ledger")
        .arg(&ledger)
        .arg("--branch")
        .arg(&branch)
        .arg("--mobile")
        .arg(&mobile)
        .assert()
        .success()
        .stderr(predicate::str::contains("Error reading branch.xlsx"))
        .stdout(predicate::str::contains("Daily Collection"))
        .stdout(predicate::str::contains("TW-9001"))
        .stdout(predicate::str::contains("9998887776"));
}

#[test]
fn init_writes_settings_used_by_run() {
    let fx = Fixture::new();
    let out = fx.path("extracts");

    fx.cmd()
        .args(["init", "--duplicate-keys", "first-match", "--preview-rows", "2"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("first-match"));

    let settings = std::fs::read_to_string(
        fx.dir
            .path()
            .join(".config")
            .join("demand-extract")
            .join("settings.json"),
    )
    .unwrap();
    assert!(settings.contains("\"first-match\""));

    let ledger = fx.write("daily.csv", LEDGER.as_bytes());
    let branch = fx.write_branch("branch.xlsx", &[("7", "en"), ("0007", "hi")]);
    let mobile = fx.write("mobile.csv", MOBILE.as_bytes());

    fx.cmd()
        .args(["run", "--date", "2025-03-01"])
        .arg("--ledger")
        .arg(&ledger)
        .arg("--branch")
        .arg(&branch)
        .arg("--mobile")
        .arg(&mobile)
        .assert()
        .success();

    let tw = read_sheet(&out.join("TW.xlsx"));
    assert_eq!(tw.len(), 2);
    assert_eq!(tw[1][3], Data::String("en".to_string()));
}
