use crate::domain::ports::JitterSource;
use rand::Rng;

/// Uniform draw from `0..=max` per call.
#[derive(Debug, Clone, Copy)]
pub struct RandomJitter {
    max: u32,
}

impl RandomJitter {
    pub fn new(max: u32) -> Self {
        Self { max }
    }
}

impl JitterSource for RandomJitter {
    fn jitter(&self) -> u32 {
        rand::thread_rng().gen_range(0..=self.max)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FixedJitter(pub u32);

impl JitterSource for FixedJitter {
    fn jitter(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_jitter_stays_in_range() {
        let jitter = RandomJitter::new(10);
        for _ in 0..1000 {
            assert!(jitter.jitter() <= 10);
        }
        assert_eq!(RandomJitter::new(0).jitter(), 0);
    }
}
