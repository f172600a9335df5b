// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod post_repo;
pub mod util;

pub use post_repo::InMemoryPostRepo;
pub use util::{DummyClock, FixedRandom, fixed_now};
