use chrono::{TimeZone, Utc};
use phi_echo::journal::LOG_COLUMNS;
use phi_echo::{render_trend, EchoError, LogRow, SessionLog};

fn entry(hour: u32, pre: f64, post: f64, note: &str) -> LogRow {
    LogRow::new(
        Utc.with_ymd_and_hms(2024, 6, 2, hour, 15, 0).unwrap(),
        pre,
        post,
        note,
    )
}

#[test]
fn three_appends_keep_call_order_and_fields() {
    let dir = tempfile::tempdir().unwrap();
    let log = SessionLog::open(dir.path().join("consciousness_log.csv"));

    let rows = [
        entry(7, 48.2, 71.9, "woke up foggy"),
        entry(12, 55.0, 83.1, ""),
        entry(21, 61.7, 90.04, "after the gamma session, clear"),
    ];

    let mut last = None;
    for row in &rows {
        last = Some(log.append(row.clone()).unwrap());
    }
    let table = last.unwrap().table;

    assert_eq!(table.len(), 3);
    assert_eq!(table.rows(), &rows);
    assert_eq!(log.load(), table);

    let trend = render_trend(&table);
    assert_eq!(trend.values(), vec![71.9, 83.1, 90.04]);
}

#[test]
fn missing_store_yields_one_row_table() {
    let dir = tempfile::tempdir().unwrap();
    let log = SessionLog::open(dir.path().join("never_written.csv"));

    let appended = log.append(entry(9, 40.0, 60.0, "first")).unwrap();
    assert_eq!(appended.table.len(), 1);
    assert_eq!(appended.table.columns(), LOG_COLUMNS);
    assert_eq!(LOG_COLUMNS, ["Date", "Pre_Φ", "Post_Φ", "Note"]);
    assert!(appended.recovered_from.is_none());
}

#[test]
fn corrupt_store_does_not_fail_append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    std::fs::write(&path, [0xff_u8, 0xfe, 0x00, 0x41, 0x0a, 0x80]).unwrap();

    let log = SessionLog::open(&path);
    let appended = log.append(entry(9, 40.0, 60.0, "fresh start")).unwrap();

    assert_eq!(appended.table.len(), 1);
    assert!(matches!(
        appended.recovered_from,
        Some(EchoError::MissingOrCorruptLog { .. })
    ));

    let header = std::fs::read_to_string(&path).unwrap();
    assert!(header.starts_with("Date,Pre_Φ,Post_Φ,Note\n"));
}
