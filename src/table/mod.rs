/// Tables
///
/// [`Table`] is the public handle; [`TableData`] holds the state and runs
/// every operation. Rows are staged on the client side and committed in one
/// call:
///
/// ```text
/// DirectRow      ─→ mutate_row / mutate_rows    ─→ Status per row
/// ConditionalRow ─→ check_and_mutate_row        ─→ predicate matched?
/// AppendRow      ─→ read_modify_write_row       ─→ modified cells
/// ```
mod append_row;
mod conditional_row;
mod direct_row;
#[allow(clippy::module_inception)]
mod table;
mod table_data;

pub use append_row::AppendRow;
pub use conditional_row::ConditionalRow;
pub use direct_row::DirectRow;
pub use table::Table;
pub(crate) use table_data::TableData;
