pub mod errors;
pub mod permalink;
pub mod post;
