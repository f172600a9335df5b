pub mod database;
pub mod random;
pub mod repositories;
pub mod time;
