use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaState {
    pub generation_count: u32,
    pub max_generations: u32,
}

impl QuotaState {
    pub fn new(generation_count: u32, max_generations: u32) -> Self {
        Self {
            generation_count,
            max_generations,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.generation_count >= self.max_generations
    }

    pub fn remaining(&self) -> u32 {
        self.max_generations.saturating_sub(self.generation_count)
    }
}
