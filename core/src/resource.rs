//! Binding between a remote collection and its typed payloads.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// One item of a remote collection, identified by `id`.
pub trait Record: DeserializeOwned + Serialize + Clone + fmt::Debug {
    fn id(&self) -> u64;
}

/// A named remote collection and the payload types it accepts.
///
/// `NAME` is both the URL segment for list/update/delete and the key of the
/// wrapper object returned by list. `CREATE_PATH` is the (possibly distinct)
/// endpoint used for create.
pub trait Resource {
    const NAME: &'static str;
    const CREATE_PATH: &'static str;

    type Record: Record;
    type Create: Serialize + fmt::Debug;
    type Update: Serialize + fmt::Debug;

    /// Local check run before a create request is built.
    fn validate_create(_input: &Self::Create) -> Result<(), String> {
        Ok(())
    }

    /// Local check run before an update request is built.
    fn validate_update(_input: &Self::Update) -> Result<(), String> {
        Ok(())
    }
}

/// Rejects empty or whitespace-only text.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be blank"));
    }
    Ok(())
}

/// Same as `require_text`, for optional update fields.
pub(crate) fn require_text_if_set(field: &str, value: Option<&str>) -> Result<(), String> {
    value.map_or(Ok(()), |v| require_text(field, v))
}
