//! Core grid logic, free of rendering concerns:
//! - Query codec (grid state to and from the query string)
//! - Column layout (responsive sizing)
//! - Sorting (single-column sort state machine)
//! - Pagination (page arithmetic and footer labels)

pub mod query_codec;
pub mod column_layout;
pub mod sorting;
pub mod pagination;
