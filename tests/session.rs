use mmap_slots::{
    allocate, read_slots, write_records, Record, Slot, SlotStore, StoreConfig, StoreError,
    RECORD_SIZE,
};

fn text_at(slots: &[Slot], i: usize) -> Option<String> {
    slots[i].record().map(|r| r.payload.text())
}

#[test]
fn sparse_session_over_ten_slots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("large_file.dat");
    let cfg = StoreConfig::with_capacity(200);

    allocate(&path, &cfg).unwrap();
    let records = [
        Record::new(0, "A").unwrap(),
        Record::new(2, "B").unwrap(),
        Record::new(9, "C").unwrap(),
        Record::new(12, "D").unwrap(),
    ];
    let report = write_records(&path, &records, &cfg).unwrap();
    assert_eq!(report.written, vec![0, 2, 9]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 12);
    assert_eq!(report.skipped[0].offset, 240);

    // 文件没有被越界写入撑大
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 200);

    let slots = read_slots(&path, 10).unwrap();
    assert_eq!(slots.len(), 10);
    assert_eq!(text_at(&slots, 0).as_deref(), Some("A"));
    assert_eq!(text_at(&slots, 2).as_deref(), Some("B"));
    assert_eq!(text_at(&slots, 9).as_deref(), Some("C"));
    for i in [1, 3, 4, 5, 6, 7, 8] {
        assert_eq!(slots[i], Slot::Empty { slot: i });
    }

    assert!(matches!(
        read_slots(&path, 13),
        Err(StoreError::ReadOutOfBounds { .. })
    ));
}

#[test]
fn repeated_index_keeps_last_write() {
    let dir = tempfile::tempdir().unwrap();
    let store = SlotStore::open(dir.path().join("s.dat"), StoreConfig::with_capacity(200)).unwrap();
    store.allocate().unwrap();
    store
        .write(&[Record::new(3, "X").unwrap(), Record::new(3, "Y").unwrap()])
        .unwrap();

    let slots = store.read(4).unwrap();
    assert_eq!(slots[3].to_string(), "Index: 3, Data: Y");
}

#[test]
fn reallocation_wipes_previous_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = SlotStore::open(dir.path().join("s.dat"), StoreConfig::with_capacity(100)).unwrap();
    store.allocate().unwrap();
    store.write(&[Record::new(1, "old").unwrap()]).unwrap();

    store.allocate().unwrap();
    assert!(store.read(5).unwrap()[1].is_empty());
}

#[test]
fn original_driver_session_output() {
    let dir = tempfile::tempdir().unwrap();
    let store = SlotStore::open(
        dir.path().join("large_file.dat"),
        StoreConfig::with_capacity(64 * RECORD_SIZE as u64),
    )
    .unwrap();
    store.allocate().unwrap();
    let records: Vec<Record> = [
        (0, "1 record data"),
        (2, "3 record data"),
        (5, "6 record data"),
        (7, "8 record data"),
        (10, "11 record data"),
        (50, "51 record data"),
    ]
    .into_iter()
    .map(|(i, t)| Record::new(i, t).unwrap())
    .collect();
    let report = store.write(&records).unwrap();
    assert!(report.skipped.is_empty());

    let lines: Vec<String> = store.read(51).unwrap().iter().map(|s| s.to_string()).collect();
    assert_eq!(lines.len(), 51);
    assert_eq!(lines[0], "Index: 0, Data: 1 record data");
    assert_eq!(lines[1], "Index: 0(1), Data: NULL");
    assert_eq!(lines[10], "Index: 10, Data: 11 record data");
    assert_eq!(lines[50], "Index: 50, Data: 51 record data");

    let stats = store.stats().unwrap();
    assert_eq!(stats.file_bytes, 1280);
    assert_eq!(stats.addressable_slots, 64);
    assert_eq!(stats.occupied, 6);
    assert_eq!(stats.empty, 58);
}
