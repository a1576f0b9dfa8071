#![no_main]

use libfuzzer_sys::fuzz_target;
use fakebigtable::{Client, GcRule, ReadRowsOptions};

// Fuzz target for row mutations.
// Decodes an arbitrary op sequence into staged rows, commits them as one
// batch, then checks per-row statuses and that scans stay ordered.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let client = Client::new("fuzz");
    let table = client.instance("i").table("t");
    if table
        .create([("cf", GcRule::max_versions(2)), ("other", GcRule::None)])
        .is_err()
    {
        return;
    }

    let mut rows = Vec::new();
    let mut i = 0;
    while i + 2 < data.len() {
        let op_type = data[i] % 5;
        i += 1;

        let key_len = (data[i] as usize % 16).min(data.len() - i - 1);
        i += 1;
        let key = &data[i..i + key_len];
        i += key_len;

        let mut row = table.direct_row(key);
        let value = data.get(i).copied().unwrap_or(0);
        let ts = i64::from(value) * 1000;
        match op_type {
            0 => {
                row.set_cell_at("cf", "q", [value].as_slice(), ts);
            }
            1 => {
                row.set_cell("other", [value].as_slice(), "v");
            }
            2 => {
                // Unknown family fails only this row
                row.set_cell("missing", "q", "v");
            }
            3 => {
                row.delete_cell("cf", "q");
            }
            _ => {
                row.delete();
            }
        }
        i += 1;
        rows.push(row);
    }

    if rows.is_empty() {
        return;
    }

    match table.mutate_rows(&rows) {
        Ok(statuses) => {
            assert_eq!(statuses.len(), rows.len());
            for status in &statuses {
                assert!(status.is_ok() || status.code_number() == 13);
            }
        }
        // Empty row keys fail the whole batch
        Err(e) => {
            assert!(e.is_invalid_argument());
            assert!(rows.iter().any(|r| r.row_key().is_empty()));
        }
    }

    let keys: Vec<_> = table
        .read_rows(ReadRowsOptions::new())
        .expect("scan")
        .map(|row| row.row_key().to_vec())
        .collect();
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1]);
    }
});
