pub mod posts;

pub use posts::{PermalinkChangeDto, PostDto, PostWriteDto};
