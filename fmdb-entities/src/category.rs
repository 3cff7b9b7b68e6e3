use crate::id::CategoryId;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    /// Unique within the directory.
    pub name: String,
}
