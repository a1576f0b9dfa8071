use crate::util::{Result, Status};

/// Check a table or column family id against `[_a-zA-Z0-9][-_.a-zA-Z0-9]*`.
pub(crate) fn validate_identifier(kind: &str, id: &str, max_len: usize) -> Result<()> {
    if id.is_empty() {
        return Err(Status::invalid_argument(format!("{kind} id must not be empty")));
    }
    if id.len() > max_len {
        return Err(Status::invalid_argument(format!(
            "{kind} id \"{id}\" is longer than {max_len} bytes"
        )));
    }

    let mut chars = id.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !(first_ok && rest_ok) {
        return Err(Status::invalid_argument(format!(
            "{kind} id \"{id}\" must match [_a-zA-Z0-9][-_.a-zA-Z0-9]*"
        )));
    }
    Ok(())
}
