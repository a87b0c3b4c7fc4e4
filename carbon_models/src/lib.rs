use nutype::nutype;

pub mod contact;
pub mod email_address;
mod macros;

// A case-insensitive substring to search for. Empty terms match everything
// and are therefore rejected, callers treat them as "no filter".
#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, Hash, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct SearchTerm(String);
