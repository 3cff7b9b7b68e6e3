use crate::id::LocationId;

/// A postal location. City and state are always present, the
/// remaining fields depend on the quality of the source record.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id     : LocationId,
    pub street : Option<String>,
    pub city   : String,
    pub county : Option<String>,
    pub state  : String,
    pub zip    : Option<String>,
}
