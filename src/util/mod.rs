pub mod clock;
mod id;
pub mod slice;
pub mod status;

pub use clock::{SERVER_TIMESTAMP, ServerClock};
pub(crate) use id::validate_identifier;
pub use slice::Slice;
pub use status::{Code, Result, Status};
