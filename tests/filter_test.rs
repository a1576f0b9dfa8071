use std::ops::Bound;

use fakebigtable::{
    Client, GcRule, ReadRowsOptions, Row, RowFilter, Slice, Table, TimestampRange,
};

/// Table with two rows:
///
/// ```text
/// user#1: info:name@3000 = "alice", info:name@1000 = "al", info:age@1000 = "30",
///         stats:visits@2000 = "7"
/// user#2: info:name@2000 = "bob"
/// ```
fn sample_table() -> Table {
    let client = Client::new("p");
    let table = client.instance("i").table("users");
    table
        .create([("info", GcRule::None), ("stats", GcRule::None)])
        .unwrap();

    let mut row = table.direct_row("user#1");
    row.set_cell_at("info", "name", "al", 1000)
        .set_cell_at("info", "name", "alice", 3000)
        .set_cell_at("info", "age", "30", 1000)
        .set_cell_at("stats", "visits", "7", 2000);
    assert!(row.commit().unwrap().is_ok());

    let mut row = table.direct_row("user#2");
    row.set_cell_at("info", "name", "bob", 2000);
    assert!(row.commit().unwrap().is_ok());

    table
}

fn read(table: &Table, key: &str, filter: RowFilter) -> Option<Row> {
    table.read_row(key, Some(&filter)).unwrap()
}

fn scan(table: &Table, filter: RowFilter) -> Vec<Row> {
    table
        .read_rows(ReadRowsOptions::new().filter(filter))
        .unwrap()
        .collect()
}

#[test]
fn test_pass_and_block() {
    let table = sample_table();
    assert_eq!(read(&table, "user#1", RowFilter::PassAll).unwrap().cell_count(), 4);
    assert!(read(&table, "user#1", RowFilter::BlockAll).is_none());
    assert!(scan(&table, RowFilter::BlockAll).is_empty());
}

#[test]
fn test_row_key_regex_is_full_match() {
    let table = sample_table();
    assert_eq!(scan(&table, RowFilter::row_key_regex("user#1").unwrap()).len(), 1);
    assert!(scan(&table, RowFilter::row_key_regex("user").unwrap()).is_empty());
    assert_eq!(scan(&table, RowFilter::row_key_regex("user#.").unwrap()).len(), 2);
}

#[test]
fn test_invalid_regex_is_invalid_argument() {
    let err = RowFilter::row_key_regex("[unclosed").unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_unbalanced_group_is_rejected() {
    // Would match "user#1" by prefix if it slipped past the anchors
    let err = RowFilter::row_key_regex("user)|(?:x").unwrap_err();
    assert!(err.is_invalid_argument());
    let err = RowFilter::value_regex("a)|(?:b").unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_family_and_qualifier_regex() {
    let table = sample_table();

    let row = read(&table, "user#1", RowFilter::family_name_regex("stats").unwrap()).unwrap();
    assert_eq!(row.families().len(), 1);
    assert_eq!(row.cell_value("stats", "visits"), Some(&Slice::from("7")));

    let row = read(&table, "user#1", RowFilter::column_qualifier_regex("na.*").unwrap()).unwrap();
    assert_eq!(row.cell_count(), 2);
    assert!(row.cell_value("info", "age").is_none());
}

#[test]
fn test_value_regex_keeps_matching_versions() {
    let table = sample_table();
    let row = read(&table, "user#1", RowFilter::value_regex("al.*").unwrap()).unwrap();
    assert_eq!(row.cells("info", "name").len(), 2);
    assert_eq!(row.cell_count(), 2);

    assert!(read(&table, "user#2", RowFilter::value_regex("al.*").unwrap()).is_none());
}

#[test]
fn test_column_range() {
    let table = sample_table();
    let filter = RowFilter::column_range(
        "info",
        Bound::Included(Slice::from("a")),
        Bound::Excluded(Slice::from("b")),
    );
    let row = read(&table, "user#1", filter).unwrap();
    assert_eq!(row.cell_count(), 1);
    assert_eq!(row.cell_value("info", "age"), Some(&Slice::from("30")));
}

#[test]
fn test_timestamp_range() {
    let table = sample_table();
    let filter = RowFilter::timestamp_range(TimestampRange::new(2000, None));
    let rows = scan(&table, filter);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].cell_count(), 2);
    assert_eq!(rows[0].cell_value("info", "name"), Some(&Slice::from("alice")));
}

#[test]
fn test_cells_row_offset_and_limit() {
    let table = sample_table();

    // cells in row order: info:age, info:name@3000, info:name@1000, stats:visits
    let row = read(&table, "user#1", RowFilter::cells_row_limit(2)).unwrap();
    assert_eq!(row.cell_value("info", "age"), Some(&Slice::from("30")));
    assert_eq!(row.cells("info", "name").len(), 1);

    let row = read(&table, "user#1", RowFilter::cells_row_offset(3)).unwrap();
    assert_eq!(row.cell_count(), 1);
    assert_eq!(row.cell_value("stats", "visits"), Some(&Slice::from("7")));

    assert!(read(&table, "user#2", RowFilter::cells_row_offset(1)).is_none());
}

#[test]
fn test_strip_value_and_label() {
    let table = sample_table();
    let filter = RowFilter::chain([
        RowFilter::family_name_regex("info").unwrap(),
        RowFilter::strip_value(),
        RowFilter::apply_label("stripped").unwrap(),
    ]);
    let row = read(&table, "user#2", filter).unwrap();
    let cell = &row.cells("info", "name")[0];
    assert!(cell.value().is_empty());
    assert_eq!(cell.labels(), ["stripped".to_string()]);

    assert!(RowFilter::apply_label("").is_err());
}

#[test]
fn test_chain_short_circuits() {
    let table = sample_table();
    let filter = RowFilter::chain([
        RowFilter::row_key_regex("user#1").unwrap(),
        RowFilter::cells_column_limit(1),
    ]);
    let rows = scan(&table, filter);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cell_count(), 3);

    assert_eq!(scan(&table, RowFilter::chain(Vec::new())).len(), 2);
}

#[test]
fn test_interleave_unions_results() {
    let table = sample_table();
    let filter = RowFilter::interleave([
        RowFilter::family_name_regex("stats").unwrap(),
        RowFilter::column_qualifier_regex("age").unwrap(),
    ]);
    let row = read(&table, "user#1", filter).unwrap();
    assert_eq!(row.cell_count(), 2);

    // the same cell from two branches is kept twice
    let filter = RowFilter::interleave([RowFilter::PassAll, RowFilter::PassAll]);
    let row = read(&table, "user#2", filter).unwrap();
    assert_eq!(row.cell_count(), 2);

    assert!(read(&table, "user#2", RowFilter::interleave(Vec::new())).is_none());
}

#[test]
fn test_condition() {
    let table = sample_table();
    let filter = RowFilter::condition(
        RowFilter::family_name_regex("stats").unwrap(),
        Some(RowFilter::column_qualifier_regex("name").unwrap()),
        Some(RowFilter::BlockAll),
    );

    let row = read(&table, "user#1", filter.clone()).unwrap();
    assert_eq!(row.cells("info", "name").len(), 2);
    assert!(read(&table, "user#2", filter).is_none());

    let no_false_branch =
        RowFilter::condition(RowFilter::family_name_regex("stats").unwrap(), Some(RowFilter::PassAll), None);
    assert!(read(&table, "user#2", no_false_branch).is_none());
}
