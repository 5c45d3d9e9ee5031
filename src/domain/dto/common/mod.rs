pub mod response;
pub mod query;

pub use response::{ApiResponse, PaginationMeta};
pub use query::{page_offset, QueryParams, SortBy, SortOrder, DEFAULT_LIMIT};
