//! Integration tests for the series facade
//!
//! Store, loader and resampler working together.

use series_facade::{
    encode_counter_value, CounterWriter, LoadConfig, MemoryStore, Observation, ResampleConfig,
    Row, ScanProvider, SeriesError,
};

fn populated_store() -> MemoryStore {
    let mut store = MemoryStore::open("stats");
    {
        let mut writer = CounterWriter::new(&mut store);
        for hour in 0..6i64 {
            for _ in 0..=hour {
                writer.record("10.0.0.99", 1_725_000_000 + hour * 3600 + 17).unwrap();
            }
        }
        writer.record("10.0.0.9", 1_725_000_000).unwrap();
        writer.record("10.0.0.100", 1_725_000_000).unwrap();
    }
    store
}

#[test]
fn test_load_only_requested_entity() {
    let store = populated_store();
    let load = LoadConfig::default()
        .loader()
        .load(&store, "10.0.0.99")
        .unwrap();

    assert_eq!(load.observations.len(), 6);
    assert_eq!(load.summary.foreign_rows, 0);
    assert!(load.summary.is_clean());
    let counts: Vec<u64> = load.observations.iter().map(|o| o.value).collect();
    assert_eq!(counts, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_load_then_resample() {
    let store = populated_store();
    let load = LoadConfig::default()
        .loader()
        .load(&store, "10.0.0.99")
        .unwrap();
    let bins = ResampleConfig::default()
        .resampler()
        .unwrap()
        .resample(&load.observations)
        .unwrap();

    assert_eq!(bins.len(), 6);
    assert_eq!(bins[0].bin_start, 1_724_997_600);
    assert_eq!(
        bins.iter().map(|b| b.sum).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5, 6]
    );
}

#[test]
fn test_corrupt_rows_are_counted_not_fatal() {
    let mut store = populated_store();
    store
        .put(Row::new(b"10.0.0.99#17250x0000".to_vec()).with_cell(
            "stats",
            "ips",
            encode_counter_value(1).to_vec(),
        ))
        .unwrap();
    store
        .set_cell(b"10.0.0.99#0000000001725100000", "stats", "ips", vec![])
        .unwrap();

    let load = LoadConfig::default()
        .loader()
        .load(&store, "10.0.0.99")
        .unwrap();
    assert_eq!(load.observations.len(), 6);
    assert_eq!(load.summary.malformed_keys, 1);
    assert_eq!(load.summary.malformed_values, 1);
    assert_eq!(load.summary.skipped(), 2);
}

#[test]
fn test_mixed_legacy_and_padded_keys() {
    let mut store = MemoryStore::open("stats");
    store
        .set_cell(b"h#999999999", "stats", "ips", encode_counter_value(1).to_vec())
        .unwrap();
    store
        .set_cell(b"h#1000000000", "stats", "ips", encode_counter_value(2).to_vec())
        .unwrap();

    let load = LoadConfig::default().loader().load(&store, "h").unwrap();
    // Unpadded keys come back in lexicographic, not numeric, order.
    assert_eq!(
        load.observations,
        vec![Observation::new(1_000_000_000, 2), Observation::new(999_999_999, 1)]
    );
    assert_eq!(load.summary.out_of_order, 1);
}

#[test]
fn test_closed_store_is_unavailable() {
    let mut store = populated_store();
    store.close();
    let err = LoadConfig::default()
        .loader()
        .load(&store, "10.0.0.99")
        .unwrap_err();
    assert!(matches!(err, SeriesError::SourceUnavailable(_)));
    assert_eq!(store.name(), "stats");
}
