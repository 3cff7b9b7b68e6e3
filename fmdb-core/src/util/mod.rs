pub mod paging;
pub mod sort;
pub mod validate;
