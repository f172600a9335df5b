mod get_by_id;
mod get_by_permalink;
mod service;

pub use get_by_id::GetPostByIdQuery;
pub use get_by_permalink::{GetPostByPermalinkQuery, ListPostsByPermalinkQuery};
pub use service::PostQueryService;
