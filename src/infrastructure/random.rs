use crate::application::ports::random::RandomSource;
use rand::Rng;

#[derive(Default, Clone)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_below(&self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        rand::rng().random_range(0..upper)
    }
}
