use fakebigtable::{
    Client, Code, GcRule, ReadRowsOptions, Row, RowFilter, RowRange, RowSet, Slice, Table,
    TimestampRange,
};

fn create_table(families: &[(&str, GcRule)]) -> Table {
    let client = Client::new("test-project");
    let table = client.instance("test-instance").table("test-table");
    table
        .create(families.iter().map(|(id, rule)| (*id, rule.clone())))
        .unwrap();
    table
}

fn keys(rows: impl Iterator<Item = Row>) -> Vec<Slice> {
    rows.map(|row| row.row_key().clone()).collect()
}

#[test]
fn test_overwrite_with_max_versions_one() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);

    let mut row = table.direct_row("k1");
    row.set_cell("cf1", "c1", "v1");
    assert!(row.commit().unwrap().is_ok());

    let mut row = table.direct_row("k1");
    row.set_cell("cf1", "c1", "v2");
    assert!(row.commit().unwrap().is_ok());

    let read = table.read_row("k1", None).unwrap().unwrap();
    assert_eq!(read.cell_value("cf1", "c1"), Some(&Slice::from("v2")));
    assert_eq!(read.cells("cf1", "c1").len(), 1);
}

#[test]
fn test_unknown_family_reports_code_13() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);

    let mut row = table.direct_row("k1");
    row.set_cell("bad", "c1", "v1");
    let statuses = table.mutate_rows(&[row]).unwrap();

    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].code_number(), 13);
    assert_eq!(statuses[0].code(), Code::Internal);
    assert!(statuses[0].message().contains("unknown family"));
    assert!(table.read_row("k1", None).unwrap().is_none());
}

#[test]
fn test_row_key_regex_filter() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);
    for key in ["test_key", "other_key"] {
        let mut row = table.direct_row(key);
        row.set_cell("cf1", "c1", "v");
        row.commit().unwrap();
    }

    let filter = RowFilter::row_key_regex("^test_.*").unwrap();
    let rows = table
        .read_rows(ReadRowsOptions::new().filter(filter))
        .unwrap();
    assert_eq!(keys(rows), vec![Slice::from("test_key")]);
}

#[test]
fn test_batch_rows_are_independent() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);

    let mut good = table.direct_row("good");
    good.set_cell("cf1", "c", "v");
    let mut bad = table.direct_row("bad");
    bad.set_cell("cf1", "c", "v").set_cell("nope", "c", "v");
    let mut also_good = table.direct_row("also_good");
    also_good.set_cell("cf1", "c", "v");

    let statuses = table.mutate_rows(&[good, bad, also_good]).unwrap();
    let codes: Vec<i32> = statuses.iter().map(|s| s.code_number()).collect();
    assert_eq!(codes, vec![0, 13, 0]);

    assert!(table.read_row("good", None).unwrap().is_some());
    assert!(table.read_row("bad", None).unwrap().is_none());
    assert!(table.read_row("also_good", None).unwrap().is_some());
}

#[test]
fn test_failed_row_keeps_prior_state() {
    let table = create_table(&[("cf1", GcRule::max_versions(1)), ("cf2", GcRule::None)]);

    let mut row = table.direct_row("k");
    row.set_cell("cf1", "a", "old").set_cell("cf2", "b", "keep");
    row.commit().unwrap();

    let mut row = table.direct_row("k");
    row.set_cell("cf1", "a", "new").delete_family("cf2").set_cell("bad", "x", "y");
    let status = row.commit().unwrap();
    assert_eq!(status.code_number(), 13);

    let read = table.read_row("k", None).unwrap().unwrap();
    assert_eq!(read.cell_value("cf1", "a"), Some(&Slice::from("old")));
    assert_eq!(read.cell_value("cf2", "b"), Some(&Slice::from("keep")));
}

#[test]
fn test_range_scan_end_exclusive() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);
    for key in ["c", "a", "b"] {
        let mut row = table.direct_row(key);
        row.set_cell("cf1", "q", key);
        row.commit().unwrap();
    }

    let rows = table
        .read_rows(ReadRowsOptions::new().start_key("a").end_key("c"))
        .unwrap();
    assert_eq!(keys(rows), vec![Slice::from("a"), Slice::from("b")]);

    let rows = table
        .read_rows(ReadRowsOptions::new().start_key("aa"))
        .unwrap();
    assert_eq!(keys(rows), vec![Slice::from("b"), Slice::from("c")]);

    let rows = table
        .read_rows(
            ReadRowsOptions::new()
                .start_key("a")
                .end_key("c")
                .end_inclusive(true),
        )
        .unwrap();
    assert_eq!(keys(rows).len(), 3);

    let rows = table.read_rows(ReadRowsOptions::new()).unwrap();
    assert_eq!(
        keys(rows),
        vec![Slice::from("a"), Slice::from("b"), Slice::from("c")]
    );
}

#[test]
fn test_scan_limit_and_partial_consumption() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);
    for i in 0..10 {
        let mut row = table.direct_row(format!("row{i:02}"));
        row.set_cell("cf1", "q", "v");
        row.commit().unwrap();
    }

    let rows = table.read_rows(ReadRowsOptions::new().limit(3)).unwrap();
    assert_eq!(rows.count(), 3);

    let mut rows = table.read_rows(ReadRowsOptions::new()).unwrap();
    assert_eq!(rows.next().unwrap().row_key(), &Slice::from("row00"));
    drop(rows);

    // a fresh scan starts over
    let rows = table.read_rows(ReadRowsOptions::new()).unwrap();
    assert_eq!(rows.count(), 10);
}

#[test]
fn test_row_set_scan() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);
    for key in ["a", "b", "c", "d", "e"] {
        let mut row = table.direct_row(key);
        row.set_cell("cf1", "q", key);
        row.commit().unwrap();
    }

    let mut set = RowSet::new();
    set.add_row_key("e")
        .add_row_key("missing")
        .add_row_range(RowRange::closed_open(
            Some(Slice::from("b")),
            Some(Slice::from("d")),
        ))
        .add_row_key("c");

    let rows = table.read_rows(ReadRowsOptions::new().row_set(set)).unwrap();
    assert_eq!(
        keys(rows),
        vec![Slice::from("b"), Slice::from("c"), Slice::from("e")]
    );
}

#[test]
fn test_cells_column_limit() {
    let table = create_table(&[("cf1", GcRule::None)]);
    let mut row = table.direct_row("k");
    for ts in [1000, 2000, 3000] {
        row.set_cell_at("cf1", "q", format!("v{ts}"), ts);
    }
    row.commit().unwrap();

    let none = RowFilter::cells_column_limit(0);
    assert!(table.read_row("k", Some(&none)).unwrap().is_none());

    let one = RowFilter::cells_column_limit(1);
    let read = table.read_row("k", Some(&one)).unwrap().unwrap();
    assert_eq!(read.cells("cf1", "q").len(), 1);
    assert_eq!(read.cell_value("cf1", "q"), Some(&Slice::from("v3000")));

    let all = table.read_row("k", None).unwrap().unwrap();
    let many = RowFilter::cells_column_limit(3);
    assert_eq!(table.read_row("k", Some(&many)).unwrap().unwrap(), all);
    let more = RowFilter::cells_column_limit(10);
    assert_eq!(table.read_row("k", Some(&more)).unwrap().unwrap(), all);
}

#[test]
fn test_delete_only_cell_makes_row_absent() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);
    let mut row = table.direct_row("k");
    row.set_cell("cf1", "q", "v");
    row.commit().unwrap();

    let mut row = table.direct_row("k");
    row.delete_cell("cf1", "q");
    assert!(row.commit().unwrap().is_ok());

    assert!(table.read_row("k", None).unwrap().is_none());
    assert_eq!(table.read_rows(ReadRowsOptions::new()).unwrap().count(), 0);
}

#[test]
fn test_delete_row_and_time_range() {
    let table = create_table(&[("cf1", GcRule::None)]);
    let mut row = table.direct_row("k");
    row.set_cell_at("cf1", "q", "1", 1000)
        .set_cell_at("cf1", "q", "2", 2000)
        .set_cell_at("cf1", "q", "3", 3000);
    row.commit().unwrap();

    let mut row = table.direct_row("k");
    row.delete_cells_in_range("cf1", "q", TimestampRange::new(2000, Some(3000)));
    row.commit().unwrap();
    let read = table.read_row("k", None).unwrap().unwrap();
    let timestamps: Vec<i64> = read
        .cells("cf1", "q")
        .iter()
        .map(|c| c.timestamp_micros())
        .collect();
    assert_eq!(timestamps, vec![3000, 1000]);

    let mut row = table.direct_row("k");
    row.delete();
    row.commit().unwrap();
    assert!(table.read_row("k", None).unwrap().is_none());
}

#[test]
fn test_explicit_timestamp_validation() {
    let table = create_table(&[("cf1", GcRule::None)]);

    let mut row = table.direct_row("k");
    row.set_cell_at("cf1", "q", "v", 1500);
    assert_eq!(row.commit().unwrap().code(), Code::InvalidArgument);

    let mut row = table.direct_row("k");
    row.set_cell_at("cf1", "q", "v", -5);
    assert_eq!(row.commit().unwrap().code(), Code::InvalidArgument);

    assert!(table.read_row("k", None).unwrap().is_none());
}

#[test]
fn test_same_timestamp_overwrites() {
    let table = create_table(&[("cf1", GcRule::None)]);
    for value in ["first", "second"] {
        let mut row = table.direct_row("k");
        row.set_cell_at("cf1", "q", value, 5000);
        row.commit().unwrap();
    }

    let read = table.read_row("k", None).unwrap().unwrap();
    assert_eq!(read.cells("cf1", "q").len(), 1);
    assert_eq!(read.cell_value("cf1", "q"), Some(&Slice::from("second")));
}

#[test]
fn test_invalid_row_key_fails_whole_batch() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);

    let mut good = table.direct_row("good");
    good.set_cell("cf1", "q", "v");
    let mut empty = table.direct_row("");
    empty.set_cell("cf1", "q", "v");

    let err = table.mutate_rows(&[good, empty]).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(table.read_row("good", None).unwrap().is_none());
}

#[test]
fn test_empty_mutation_list_is_per_row_error() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);

    let mut row = table.direct_row("k");
    row.set_cell("cf1", "q", "v");
    let empty = table.direct_row("j");

    let statuses = table.mutate_rows(&[row, empty]).unwrap();
    assert!(statuses[0].is_ok());
    assert_eq!(statuses[1].code(), Code::InvalidArgument);
}

#[test]
fn test_commit_clears_staged_mutations() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);
    let mut row = table.direct_row("k");
    row.set_cell("cf1", "q", "v");
    assert_eq!(row.mutation_count(), 1);

    row.commit().unwrap();
    assert_eq!(row.mutation_count(), 0);
}

#[test]
fn test_table_catalog() {
    let client = Client::new("p");
    let instance = client.instance("i");
    let table = instance.table("t");

    assert!(!table.exists());
    assert!(table.read_row("k", None).unwrap_err().is_not_found());
    assert!(table.direct_row("k").commit().unwrap_err().is_not_found());

    table.create([("cf1", GcRule::max_versions(1))]).unwrap();
    assert!(table.exists());
    assert!(table
        .create([("cf1", GcRule::max_versions(1))])
        .unwrap_err()
        .is_already_exists());

    let ids: Vec<String> = instance
        .list_tables()
        .iter()
        .map(|t| t.table_id().to_string())
        .collect();
    assert_eq!(ids, vec!["t".to_string()]);
    assert_eq!(table.name(), "projects/p/instances/i/tables/t");

    table.delete().unwrap();
    assert!(!table.exists());
    assert!(table.delete().unwrap_err().is_not_found());
}

#[test]
fn test_table_creation_is_all_or_nothing() {
    let client = Client::new("p");
    let table = client.instance("i").table("t");

    let err = table
        .create([("cf1", GcRule::max_versions(1)), ("bad id", GcRule::None)])
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(!table.exists());
}

#[test]
fn test_column_family_lifecycle() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);

    let cf2 = table.column_family("cf2", GcRule::max_versions(3));
    cf2.create().unwrap();
    assert!(cf2.create().unwrap_err().is_already_exists());

    let families = table.list_column_families().unwrap();
    assert_eq!(families.len(), 2);
    assert_eq!(families["cf2"], cf2);
    assert_eq!(families["cf1"].gc_rule(), &GcRule::max_versions(1));

    let mut row = table.direct_row("k");
    for ts in [1000, 2000, 3000] {
        row.set_cell_at("cf2", "q", "v", ts);
    }
    row.set_cell("cf1", "q", "v");
    row.commit().unwrap();

    table
        .column_family("cf2", GcRule::max_versions(1))
        .update()
        .unwrap();
    let read = table.read_row("k", None).unwrap().unwrap();
    assert_eq!(read.cells("cf2", "q").len(), 1);

    cf2.delete().unwrap();
    let read = table.read_row("k", None).unwrap().unwrap();
    assert!(read.families().get("cf2").is_none());
    assert!(table
        .column_family("missing", GcRule::None)
        .delete()
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_conditional_row() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);
    let mut row = table.direct_row("k");
    row.set_cell("cf1", "status", "pending");
    row.commit().unwrap();

    let predicate = RowFilter::value_regex("pending").unwrap();
    let mut cond = table.conditional_row("k", predicate.clone());
    cond.set_cell("cf1", "status", "done", true)
        .set_cell("cf1", "status", "skipped", false);
    assert!(cond.commit().unwrap());
    let read = table.read_row("k", None).unwrap().unwrap();
    assert_eq!(read.cell_value("cf1", "status"), Some(&Slice::from("done")));

    let mut cond = table.conditional_row("k", predicate);
    cond.set_cell("cf1", "status", "again", true)
        .set_cell("cf1", "status", "skipped", false);
    assert!(!cond.commit().unwrap());
    let read = table.read_row("k", None).unwrap().unwrap();
    assert_eq!(read.cell_value("cf1", "status"), Some(&Slice::from("skipped")));
}

#[test]
fn test_conditional_row_unknown_family_is_error() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);
    let mut cond = table.conditional_row("k", RowFilter::PassAll);
    cond.set_cell("cf1", "q", "v", true)
        .set_cell("bad", "q", "v", false);

    let err = cond.commit().unwrap_err();
    assert_eq!(err.code_number(), 13);
    assert!(table.read_row("k", None).unwrap().is_none());
}

#[test]
fn test_append_row() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);

    let mut row = table.append_row("counter");
    row.increment_cell_value("cf1", "hits", 2)
        .append_cell_value("cf1", "log", "a");
    let result = row.commit().unwrap();
    assert_eq!(
        result.cell_value("cf1", "hits").unwrap().data(),
        2i64.to_be_bytes().as_slice()
    );

    let mut row = table.append_row("counter");
    row.increment_cell_value("cf1", "hits", 5)
        .append_cell_value("cf1", "log", "bc");
    row.commit().unwrap();

    let read = table.read_row("counter", None).unwrap().unwrap();
    assert_eq!(
        read.cell_value("cf1", "hits").unwrap().data(),
        7i64.to_be_bytes().as_slice()
    );
    assert_eq!(read.cell_value("cf1", "log"), Some(&Slice::from("abc")));
    assert_eq!(read.cells("cf1", "hits").len(), 1);
}

#[test]
fn test_truncate_and_drop_by_prefix() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);
    for key in ["user#1", "user#2", "order#1", "order#2", "other"] {
        let mut row = table.direct_row(key);
        row.set_cell("cf1", "q", "v");
        row.commit().unwrap();
    }

    assert_eq!(table.drop_by_prefix("user#").unwrap(), 2);
    let rows = table.read_rows(ReadRowsOptions::new()).unwrap();
    assert_eq!(
        keys(rows),
        vec![
            Slice::from("order#1"),
            Slice::from("order#2"),
            Slice::from("other")
        ]
    );

    table.truncate().unwrap();
    assert_eq!(table.read_rows(ReadRowsOptions::new()).unwrap().count(), 0);
}

#[test]
fn test_scan_sees_snapshot() {
    let table = create_table(&[("cf1", GcRule::max_versions(1))]);
    for key in ["a", "b", "c"] {
        let mut row = table.direct_row(key);
        row.set_cell("cf1", "q", "before");
        row.commit().unwrap();
    }

    let mut rows = table.read_rows(ReadRowsOptions::new()).unwrap();
    let first = rows.next().unwrap();
    assert_eq!(first.cell_value("cf1", "q"), Some(&Slice::from("before")));

    // changes after the scan started are invisible to it
    let mut row = table.direct_row("b");
    row.set_cell("cf1", "q", "after");
    row.commit().unwrap();
    let mut row = table.direct_row("bb");
    row.set_cell("cf1", "q", "after");
    row.commit().unwrap();
    let mut row = table.direct_row("c");
    row.delete();
    row.commit().unwrap();

    let rest: Vec<Row> = rows.collect();
    assert_eq!(rest.len(), 2);
    assert_eq!(rest[0].cell_value("cf1", "q"), Some(&Slice::from("before")));
    assert_eq!(rest[1].row_key(), &Slice::from("c"));

    // a new scan sees the new state
    let rows = table.read_rows(ReadRowsOptions::new()).unwrap();
    assert_eq!(
        keys(rows),
        vec![Slice::from("a"), Slice::from("b"), Slice::from("bb")]
    );
}

#[test]
fn test_statistics() {
    let client = Client::new("p");
    let table = client.instance("i").table("t");
    table.create([("cf1", GcRule::max_versions(1))]).unwrap();

    let mut row = table.direct_row("k");
    row.set_cell("cf1", "q", "v");
    row.commit().unwrap();
    let mut row = table.direct_row("k");
    row.set_cell("bad", "q", "v");
    row.commit().unwrap();
    table.read_row("k", None).unwrap();

    let stats = client.statistics();
    assert_eq!(stats.rows_mutated(), 1);
    assert_eq!(stats.rows_failed(), 1);
    assert_eq!(stats.rows_read(), 1);
    assert!(stats.report().contains("Rows failed:   1"));
}
