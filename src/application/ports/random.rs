// src/application/ports/random.rs
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `0..upper`.
    fn next_below(&self, upper: u32) -> u32;
}
