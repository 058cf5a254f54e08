use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Workspace {
    home: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("tempdir"),
        }
    }

    fn data_dir(&self) -> PathBuf {
        self.home.path().join("data")
    }

    fn lapor(&self) -> Command {
        let mut cmd = Command::cargo_bin("lapor").expect("bin");
        cmd.env("HOME", self.home.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    fn init(&self) {
        self.lapor()
            .args(["init", "--data-dir"])
            .arg(self.data_dir())
            .args(["--company", "PT Maju Jaya"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Initialized lapor"));
    }

    /// File a complete report and return its number.
    fn file_report(&self, extra: &[&str]) -> String {
        let output = self
            .lapor()
            .args([
                "new",
                "--report-date",
                "2024-05-02",
                "--accident-date",
                "2024-05-02T07:15",
                "--location",
                "Bengkel Las",
                "--department",
                "Produksi",
                "--type",
                "Terbakar",
                "--description",
                "Percikan api mengenai tangan",
                "--injured",
                "Budi Santoso",
                "--injury",
                "Luka bakar",
                "--body-part",
                "Tangan",
                "--immediate-action",
                "Pemberian P3K",
                "--root-cause",
                "Selang gas bocor",
                "--corrective-action",
                "Ganti selang",
                "--preventive-action",
                "Inspeksi mingguan",
                "--investigator",
                "Rina",
                "--supervisor",
                "Hadi",
            ])
            .args(extra)
            .output()
            .expect("run new");
        assert!(
            output.status.success(),
            "new failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("utf8").trim().to_string()
    }

    fn corrupt_storage(&self) {
        let conn = rusqlite::Connection::open(self.data_dir().join("lapor.db")).expect("open db");
        conn.execute(
            "UPDATE kv_store SET value = '{not json' WHERE key = 'accidentReports'",
            [],
        )
        .expect("corrupt");
    }
}

fn is_file(path: &Path) -> bool {
    path.is_file()
}

#[test]
fn commands_before_init_point_to_init() {
    let ws = Workspace::new();
    ws.lapor()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("lapor init"));
}

#[test]
fn init_creates_storage_and_settings() {
    let ws = Workspace::new();
    ws.init();
    assert!(is_file(&ws.data_dir().join("lapor.db")));
    assert!(ws.data_dir().join("exports").is_dir());
    assert!(is_file(&ws.home.path().join(".config/lapor/settings.json")));

    ws.lapor()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("PT Maju Jaya"))
        .stdout(predicate::str::contains("Reports:    0"));
}

#[test]
fn report_lifecycle() {
    let ws = Workspace::new();
    ws.init();
    let number = ws.file_report(&[]);
    assert!(number.starts_with("LAP-"), "unexpected number {number}");

    ws.lapor()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(number.as_str()))
        .stdout(predicate::str::contains("2/5/2024"));

    ws.lapor()
        .args(["search", "budi"])
        .assert()
        .success()
        .stdout(predicate::str::contains(number.as_str()));

    ws.lapor()
        .args(["search", "tidak-ada-yang-cocok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tidak ditemukan laporan"));

    ws.lapor()
        .args(["view", &number])
        .assert()
        .success()
        .stdout(predicate::str::contains("Informasi Kejadian"))
        .stdout(predicate::str::contains("Perusahaan: PT Maju Jaya"))
        .stdout(predicate::str::contains("Percikan api mengenai tangan"));

    ws.lapor()
        .args(["delete", &number, "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Laporan berhasil dihapus"));

    ws.lapor()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tidak ada laporan"));
}

#[test]
fn missing_required_fields_are_reported() {
    let ws = Workspace::new();
    ws.init();
    ws.lapor()
        .args(["new", "--injured", "Budi", "--type", "Terjatuh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mohon lengkapi semua field"))
        .stderr(predicate::str::contains("Missing required fields: accidentDesc"));
}

#[test]
fn duplicate_report_number_is_refused() {
    let ws = Workspace::new();
    ws.init();
    ws.file_report(&["--number", "LAP-20240502-1234"]);
    ws.lapor()
        .args(["new", "--number", "LAP-20240502-1234"])
        .args(["--type", "Terjatuh", "--description", "Licin"])
        .args(["--injured", "Andi", "--injury", "Keseleo", "--body-part", "Kaki"])
        .args(["--immediate-action", "Imobilisasi", "--root-cause", "Lantai basah"])
        .args(["--corrective-action", "Pel", "--preventive-action", "Rambu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn report_from_file_with_flag_override() {
    let ws = Workspace::new();
    ws.init();
    let path = ws.home.path().join("laporan.json");
    std::fs::write(
        &path,
        r#"{
            "reportNumber": "LAP-20240601-4321",
            "reportDate": "2024-06-01",
            "accidentDate": "2024-06-01T10:00",
            "department": "Gudang",
            "accidentType": "Tertimpa",
            "accidentDesc": "Kardus jatuh dari rak",
            "injuredPerson": "Sari",
            "injuryType": "Luka lecet",
            "injuredPart": "Bahu",
            "immediateAction": "Pemberian P3K",
            "rootCause": "Rak penuh",
            "correctiveAction": "Kurangi muatan",
            "preventiveAction": "Batas tumpukan"
        }"#,
    )
    .expect("write json");

    ws.lapor()
        .args(["new", "--from-file"])
        .arg(&path)
        .args(["--location", "Rak C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LAP-20240601-4321"));

    ws.lapor()
        .args(["search", "rak c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LAP-20240601-4321"));
}

#[test]
fn unknown_report_is_not_found() {
    let ws = Workspace::new();
    ws.init();
    ws.lapor()
        .args(["view", "LAP-00000000-0000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Laporan tidak ditemukan!"));
}

#[test]
fn corrupt_storage_reads_as_empty_and_is_replaced_on_save() {
    let ws = Workspace::new();
    ws.init();
    ws.file_report(&[]);
    ws.corrupt_storage();

    ws.lapor()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tidak ada laporan"))
        .stderr(predicate::str::contains("Gagal memuat data laporan"));

    let number = ws.file_report(&[]);
    ws.lapor()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(number.as_str()));
}

#[test]
fn dashboard_and_charts() {
    let ws = Workspace::new();
    ws.init();
    ws.file_report(&[]);

    ws.lapor()
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total laporan        : 1"))
        .stdout(predicate::str::contains("Kecelakaan serius    : 1"))
        .stdout(predicate::str::contains("Budi Santoso"));

    ws.lapor()
        .args(["charts", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 laporan cocok"))
        .stdout(predicate::str::contains("Mei"))
        .stdout(predicate::str::contains("Terbakar"))
        .stdout(predicate::str::contains("Produksi"));

    ws.lapor()
        .args(["charts", "--year", "2023"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 laporan cocok"));
}

#[test]
fn options_lists_reference_data() {
    let ws = Workspace::new();
    ws.lapor()
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jenis Kecelakaan"))
        .stdout(predicate::str::contains("Tersengat listrik"));
}

#[test]
fn backup_copies_database() {
    let ws = Workspace::new();
    ws.init();
    ws.file_report(&[]);
    let dest = ws.home.path().join("cadangan.db");
    ws.lapor()
        .args(["backup", "--output"])
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup saved to"))
        .stdout(predicate::str::contains("Reports: 1"));
    assert!(is_file(&dest));
}

#[test]
fn backup_as_json_writes_report_array() {
    let ws = Workspace::new();
    ws.init();
    let number = ws.file_report(&[]);
    let dest = ws.home.path().join("cadangan.json");
    ws.lapor()
        .args(["backup", "--json", "--output"])
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Reports: 1"));
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&dest).expect("json")).expect("parse");
    assert_eq!(value[0]["reportNumber"], number.as_str());
}

#[test]
fn backup_refuses_corrupt_collection() {
    let ws = Workspace::new();
    ws.init();
    ws.file_report(&[]);
    ws.corrupt_storage();
    ws.lapor()
        .arg("backup")
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn record_with_odd_fields_stays_listed() {
    let ws = Workspace::new();
    ws.init();
    let number = ws.file_report(&[]);
    let conn = rusqlite::Connection::open(ws.data_dir().join("lapor.db")).expect("open db");
    let raw: String = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = 'accidentReports'",
            [],
            |row| row.get(0),
        )
        .expect("read");
    let mut records: Vec<serde_json::Value> = serde_json::from_str(&raw).expect("array");
    records.push(serde_json::json!({
        "reportNumber": "LAP-20240503-7777",
        "createdAt": "",
        "witnesses": null
    }));
    conn.execute(
        "UPDATE kv_store SET value = ?1 WHERE key = 'accidentReports'",
        [serde_json::to_string(&records).expect("encode")],
    )
    .expect("write");

    ws.lapor()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(number.as_str()))
        .stdout(predicate::str::contains("LAP-20240503-7777"));

    let second = ws.file_report(&[]);
    ws.lapor()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(number.as_str()))
        .stdout(predicate::str::contains(second.as_str()))
        .stdout(predicate::str::contains("LAP-20240503-7777"));
}

#[test]
fn search_help_names_matched_fields() {
    let ws = Workspace::new();
    ws.lapor()
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "location, injured person, accident type or company",
        ));
}

#[cfg(feature = "pdf")]
#[test]
fn export_writes_pdf() {
    let ws = Workspace::new();
    ws.init();
    let number = ws.file_report(&[]);

    let dest = ws.home.path().join("laporan.pdf");
    ws.lapor()
        .args(["export", &number, "--output"])
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    let bytes = std::fs::read(&dest).expect("pdf");
    assert!(bytes.starts_with(b"%PDF"));

    ws.lapor().args(["export", &number]).assert().success();
    assert!(is_file(
        &ws.data_dir().join("exports").join(format!("Laporan_{number}.pdf"))
    ));
}
