#![no_main]

use libfuzzer_sys::fuzz_target;
use fakebigtable::{Client, GcRule, ReadRowsOptions, RowFilter};

// Fuzz target for regex row filters.
// Arbitrary patterns must either be rejected as invalid arguments or
// evaluate without panicking, and a filtered scan never returns more rows
// than an unfiltered one.
fuzz_target!(|data: &[u8]| {
    let Ok(pattern) = std::str::from_utf8(data) else {
        return;
    };

    let client = Client::new("fuzz");
    let table = client.instance("i").table("t");
    table.create([("cf", GcRule::None)]).expect("create");
    for key in ["a", "ab", "b\u{1}", "user#1", "\u{ff}"] {
        let mut row = table.direct_row(key);
        row.set_cell("cf", key, pattern);
        row.commit().expect("commit");
    }

    let builders: [fn(&str) -> fakebigtable::Result<RowFilter>; 4] = [
        RowFilter::row_key_regex,
        RowFilter::family_name_regex,
        RowFilter::column_qualifier_regex,
        RowFilter::value_regex,
    ];

    for build in builders {
        match build(pattern) {
            Ok(filter) => {
                let rows = table
                    .read_rows(ReadRowsOptions::new().filter(filter))
                    .expect("scan")
                    .count();
                assert!(rows <= 5);
            }
            Err(e) => assert!(e.is_invalid_argument()),
        }
    }
});
