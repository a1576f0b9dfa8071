use std::fmt;

/// Canonical status codes returned by the emulator.
///
/// The numeric values follow the gRPC canonical codes so that per-row results
/// compare equal to what the real service reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    Ok,
    InvalidArgument,
    NotFound,
    AlreadyExists,
    Internal,
}

impl Code {
    pub fn as_i32(self) -> i32 {
        match self {
            Code::Ok => 0,
            Code::InvalidArgument => 3,
            Code::NotFound => 5,
            Code::AlreadyExists => 6,
            Code::Internal => 13,
        }
    }
}

/// Outcome of an operation.
///
/// Used as the error half of [`Result`] for catalog, schema and read
/// operations, and as a plain value for the per-row outcome of a batched
/// mutation, where a failed row must not abort its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    code: Code,
    message: Option<String>,
}

impl Status {
    pub fn ok() -> Self {
        Status {
            code: Code::Ok,
            message: None,
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Status {
            code: Code::NotFound,
            message: Some(msg.into()),
        }
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        Status {
            code: Code::AlreadyExists,
            message: Some(msg.into()),
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Status {
            code: Code::InvalidArgument,
            message: Some(msg.into()),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Status {
            code: Code::Internal,
            message: Some(msg.into()),
        }
    }

    /// Status reported for a row whose mutations name a family the table
    /// does not have.
    pub fn unknown_family(family: &str) -> Self {
        Status::internal(format!("unknown family \"{family}\""))
    }

    pub fn is_ok(&self) -> bool {
        self.code == Code::Ok
    }

    pub fn is_not_found(&self) -> bool {
        self.code == Code::NotFound
    }

    pub fn is_already_exists(&self) -> bool {
        self.code == Code::AlreadyExists
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.code == Code::InvalidArgument
    }

    pub fn code(&self) -> Code {
        self.code
    }

    /// Numeric gRPC code, `0` for success.
    pub fn code_number(&self) -> i32 {
        self.code.as_i32()
    }

    /// Message text; empty for a successful status.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{:?}: {}", self.code, msg),
            None => write!(f, "{:?}", self.code),
        }
    }
}

impl std::error::Error for Status {}

impl From<serde_json::Error> for Status {
    fn from(err: serde_json::Error) -> Self {
        Status::invalid_argument(err.to_string())
    }
}

impl From<regex::Error> for Status {
    fn from(err: regex::Error) -> Self {
        Status::invalid_argument(format!("invalid regular expression: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, Status>;
