//! End-to-end tests for the series facade
//!
//! Dump import, scan, decode and resample using only the facade API.

use series_facade::dump::{read_dump, write_dump};
use series_facade::{
    resample, Bin, CounterWriter, MemoryStore, Result, RowStream, ScanEvent, ScanProvider,
    SeriesError, SeriesLoader,
};

/// Wraps a store and drops the completion sentinel, as a broken connection would.
struct TruncatingStore {
    inner: MemoryStore,
    keep_rows: usize,
}

impl ScanProvider for TruncatingStore {
    fn name(&self) -> &str {
        "truncating"
    }

    fn scan_range(&self, start: &[u8], end: &[u8]) -> Result<RowStream<'_>> {
        let rows = self
            .inner
            .scan_range(start, end)?
            .filter(|event| !matches!(event, Ok(ScanEvent::Complete)))
            .take(self.keep_rows);
        Ok(Box::new(rows))
    }
}

/// Fails after delivering a number of rows.
struct FlakyStore {
    inner: MemoryStore,
    fail_after: usize,
}

impl ScanProvider for FlakyStore {
    fn name(&self) -> &str {
        "flaky"
    }

    fn scan_range(&self, start: &[u8], end: &[u8]) -> Result<RowStream<'_>> {
        let fail_after = self.fail_after;
        let rows = self
            .inner
            .scan_range(start, end)?
            .enumerate()
            .map(move |(i, event)| {
                if i >= fail_after {
                    Err(SeriesError::SourceUnavailable("deadline exceeded".to_string()))
                } else {
                    event
                }
            });
        Ok(Box::new(rows))
    }
}

fn hourly_store() -> MemoryStore {
    let mut store = MemoryStore::open("stats");
    let mut writer = CounterWriter::new(&mut store);
    for hour in 0..4i64 {
        writer.record_many("10.0.0.99", hour * 3600, (hour + 1) as u64).unwrap();
    }
    store
}

#[test]
fn e2e_dump_import_to_bins() {
    let dump = "\
key,family,column,value_hex
10.0.0.99#0,stats,ips,0000000000000005
10.0.0.99#3600,stats,ips,0000000000000007
10.0.0.99#5400,stats,ips,
10.0.0.99#7200,stats,ips,0000000000000000
10.0.0.98#3600,stats,ips,00000000000000ff
";
    let mut store = MemoryStore::open("stats");
    assert_eq!(read_dump(&mut store, dump.as_bytes()).unwrap(), 5);

    let load = SeriesLoader::default().load(&store, "10.0.0.99").unwrap();
    assert_eq!(load.summary.rows_scanned, 4);
    assert_eq!(load.summary.malformed_values, 1);

    let bins = resample(&load.observations, 3600).unwrap();
    assert_eq!(
        bins,
        vec![Bin::new(0, 5), Bin::new(3600, 7), Bin::new(7200, 0)]
    );
}

#[test]
fn e2e_dump_export_import_roundtrip() {
    let store = hourly_store();
    let mut buffer = Vec::new();
    write_dump(&store, &mut buffer).unwrap();

    let mut copy = MemoryStore::open("copy");
    read_dump(&mut copy, buffer.as_slice()).unwrap();

    let a = SeriesLoader::default().load(&store, "10.0.0.99").unwrap();
    let b = SeriesLoader::default().load(&copy, "10.0.0.99").unwrap();
    assert_eq!(a.observations, b.observations);
}

#[test]
fn e2e_truncated_scan_is_reported() {
    let store = TruncatingStore {
        inner: hourly_store(),
        keep_rows: 2,
    };
    let err = SeriesLoader::default().load(&store, "10.0.0.99").unwrap_err();
    match err {
        SeriesError::SourceUnavailable(msg) => {
            assert!(msg.contains("truncating"));
            assert!(msg.contains("2 rows"));
        }
        other => panic!("Expected SourceUnavailable, got {:?}", other),
    }
}

#[test]
fn e2e_scan_failure_midway_is_reported() {
    let store = FlakyStore {
        inner: hourly_store(),
        fail_after: 1,
    };
    let err = SeriesLoader::default().load(&store, "10.0.0.99").unwrap_err();
    assert_eq!(
        err,
        SeriesError::SourceUnavailable("deadline exceeded".to_string())
    );
}

#[test]
fn e2e_unknown_entity_is_empty_series() {
    let store = hourly_store();
    let load = SeriesLoader::default().load(&store, "192.168.0.1").unwrap();
    assert!(load.observations.is_empty());
    assert_eq!(resample(&load.observations, 3600), Err(SeriesError::EmptySeries));
}
