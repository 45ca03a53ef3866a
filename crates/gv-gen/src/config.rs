//! Configuration for a generation run.

/// Configuration for a generation run.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// RNG seed for reproducible rolls.
    pub seed: u64,
    /// Ceiling on excluded-value rerolls and duplicate-trait retries
    /// before the run fails instead of looping.
    pub max_rerolls: u32,
    /// Lowest value an ability can drift to during level-up.
    pub ability_min: i32,
    /// Highest value an ability can drift to during level-up. The base
    /// ruleset caps at +3; some variants extend to +6.
    pub ability_max: i32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_rerolls: 100,
            ability_min: -3,
            ability_max: 3,
        }
    }
}

impl GeneratorConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the reroll ceiling (at least 1).
    pub fn with_max_rerolls(mut self, max_rerolls: u32) -> Self {
        self.max_rerolls = max_rerolls.max(1);
        self
    }

    /// Set the ability drift bounds.
    pub fn with_ability_bounds(mut self, min: i32, max: i32) -> Self {
        self.ability_min = min.min(max);
        self.ability_max = max;
        self
    }
}
