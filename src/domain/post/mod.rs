pub mod entity;
pub mod repository;
pub mod schema;
pub mod value_objects;

pub use entity::{Post, PostUpdate};
pub use repository::{PostReadRepository, PostWriteRepository};
pub use schema::{FEATURED_POST_TYPE, OTHER_POST_TYPE, POST_TYPE, other_post_schema, post_schema};
pub use value_objects::PostId;
