use std::sync::atomic::{AtomicU64, Ordering};

/// Emulator-wide statistics
///
/// Thread-safe statistics tracking shared by every table of a client.
/// Uses atomic counters for lock-free updates.
#[derive(Debug, Default)]
pub struct Statistics {
    // Mutations
    pub rows_mutated: AtomicU64,
    pub rows_failed: AtomicU64,
    pub cells_written: AtomicU64,
    pub cells_deleted: AtomicU64,
    pub bytes_written: AtomicU64,

    // Conditional and read-modify-write
    pub check_and_mutate_calls: AtomicU64,
    pub predicate_matches: AtomicU64,
    pub read_modify_write_calls: AtomicU64,

    // Reads
    pub scans_started: AtomicU64,
    pub rows_read: AtomicU64,
    pub rows_scanned: AtomicU64,
    pub cells_returned: AtomicU64,

    // Garbage collection
    pub gc_runs: AtomicU64,
    pub cells_collected: AtomicU64,

    // Schema
    pub tables_created: AtomicU64,
    pub tables_deleted: AtomicU64,
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    // Mutation tracking
    #[inline]
    pub fn record_row_mutation(&self, cells_written: u64, bytes: u64) {
        self.rows_mutated.fetch_add(1, Ordering::Relaxed);
        self.cells_written
            .fetch_add(cells_written, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_row_failure(&self) {
        self.rows_failed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_cells_deleted(&self, cells: u64) {
        self.cells_deleted.fetch_add(cells, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_check_and_mutate(&self, matched: bool) {
        self.check_and_mutate_calls.fetch_add(1, Ordering::Relaxed);
        if matched {
            self.predicate_matches.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn record_read_modify_write(&self) {
        self.read_modify_write_calls
            .fetch_add(1, Ordering::Relaxed);
    }

    // Read tracking
    #[inline]
    pub fn record_scan_started(&self) {
        self.scans_started.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_row_scanned(&self) {
        self.rows_scanned.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_row_read(&self, cells: u64) {
        self.rows_read.fetch_add(1, Ordering::Relaxed);
        self.cells_returned.fetch_add(cells, Ordering::Relaxed);
    }

    // GC tracking
    #[inline]
    pub fn record_gc(&self, cells_collected: u64) {
        self.gc_runs.fetch_add(1, Ordering::Relaxed);
        self.record_evicted(cells_collected);
    }

    /// Cells dropped by a GC rule, whether during a sweep or a commit
    #[inline]
    pub fn record_evicted(&self, cells: u64) {
        self.cells_collected.fetch_add(cells, Ordering::Relaxed);
    }

    // Schema tracking
    #[inline]
    pub fn record_table_created(&self) {
        self.tables_created.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_table_deleted(&self) {
        self.tables_deleted.fetch_add(1, Ordering::Relaxed);
    }

    // Getters (snapshot values)
    pub fn rows_mutated(&self) -> u64 {
        self.rows_mutated.load(Ordering::Relaxed)
    }

    pub fn rows_failed(&self) -> u64 {
        self.rows_failed.load(Ordering::Relaxed)
    }

    pub fn cells_written(&self) -> u64 {
        self.cells_written.load(Ordering::Relaxed)
    }

    pub fn cells_deleted(&self) -> u64 {
        self.cells_deleted.load(Ordering::Relaxed)
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    pub fn scans_started(&self) -> u64 {
        self.scans_started.load(Ordering::Relaxed)
    }

    pub fn rows_read(&self) -> u64 {
        self.rows_read.load(Ordering::Relaxed)
    }

    pub fn rows_scanned(&self) -> u64 {
        self.rows_scanned.load(Ordering::Relaxed)
    }

    pub fn cells_returned(&self) -> u64 {
        self.cells_returned.load(Ordering::Relaxed)
    }

    pub fn cells_collected(&self) -> u64 {
        self.cells_collected.load(Ordering::Relaxed)
    }

    /// Fraction of scanned rows that survived filtering.
    pub fn read_selectivity(&self) -> f64 {
        let read = self.rows_read() as f64;
        let scanned = self.rows_scanned() as f64;
        if scanned > 0.0 { read / scanned } else { 0.0 }
    }

    pub fn predicate_match_rate(&self) -> f64 {
        let matched = self.predicate_matches.load(Ordering::Relaxed) as f64;
        let total = self.check_and_mutate_calls.load(Ordering::Relaxed) as f64;
        if total > 0.0 { matched / total } else { 0.0 }
    }

    /// Reset all statistics to zero
    pub fn reset(&self) {
        self.rows_mutated.store(0, Ordering::Relaxed);
        self.rows_failed.store(0, Ordering::Relaxed);
        self.cells_written.store(0, Ordering::Relaxed);
        self.cells_deleted.store(0, Ordering::Relaxed);
        self.bytes_written.store(0, Ordering::Relaxed);
        self.check_and_mutate_calls.store(0, Ordering::Relaxed);
        self.predicate_matches.store(0, Ordering::Relaxed);
        self.read_modify_write_calls.store(0, Ordering::Relaxed);
        self.scans_started.store(0, Ordering::Relaxed);
        self.rows_read.store(0, Ordering::Relaxed);
        self.rows_scanned.store(0, Ordering::Relaxed);
        self.cells_returned.store(0, Ordering::Relaxed);
        self.gc_runs.store(0, Ordering::Relaxed);
        self.cells_collected.store(0, Ordering::Relaxed);
        self.tables_created.store(0, Ordering::Relaxed);
        self.tables_deleted.store(0, Ordering::Relaxed);
    }

    /// Get a formatted statistics report
    pub fn report(&self) -> String {
        format!(
            "Emulator Statistics:\n\
            \n\
            Mutations:\n\
            - Rows mutated:  {}\n\
            - Rows failed:   {}\n\
            - Cells written: {}\n\
            - Cells deleted: {}\n\
            - Bytes written: {} ({:.2} MB)\n\
            - CheckAndMutate: {} (matched {:.2}%)\n\
            - ReadModifyWrite: {}\n\
            \n\
            Reads:\n\
            - Scans:         {}\n\
            - Rows scanned:  {}\n\
            - Rows returned: {}\n\
            - Selectivity:   {:.2}%\n\
            - Cells returned: {}\n\
            \n\
            Garbage Collection:\n\
            - Runs:          {}\n\
            - Cells removed: {}\n\
            \n\
            Tables:\n\
            - Created:       {}\n\
            - Deleted:       {}",
            self.rows_mutated(),
            self.rows_failed(),
            self.cells_written(),
            self.cells_deleted(),
            self.bytes_written(),
            self.bytes_written() as f64 / 1024.0 / 1024.0,
            self.check_and_mutate_calls.load(Ordering::Relaxed),
            self.predicate_match_rate() * 100.0,
            self.read_modify_write_calls.load(Ordering::Relaxed),
            self.scans_started(),
            self.rows_scanned(),
            self.rows_read(),
            self.read_selectivity() * 100.0,
            self.cells_returned(),
            self.gc_runs.load(Ordering::Relaxed),
            self.cells_collected(),
            self.tables_created.load(Ordering::Relaxed),
            self.tables_deleted.load(Ordering::Relaxed),
        )
    }
}
