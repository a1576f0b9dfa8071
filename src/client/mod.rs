/// Client, instances and emulator options
///
/// ```text
/// Client (project, options, statistics)
///  └─→ Instance "i1"
///       ├─→ Table "t1" ─→ TableData
///       └─→ Table "t2" ─→ TableData
/// ```
///
/// Handles are cheap; the state lives in the client, keyed by instance id,
/// and in each instance, keyed by table id.
#[allow(clippy::module_inception)]
mod client;
mod instance;
mod options;

pub use client::Client;
pub use instance::{Instance, MAX_TABLE_ID_LEN, validate_table_id};
pub(crate) use instance::InstanceData;
pub use options::EmulatorOptions;
