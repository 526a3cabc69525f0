#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    pub seed: u64,
    pub players: u64,
    pub max_steps: u32,
    /// Largest raise over the current bid the policy considers, in steps of ten.
    pub max_bid_raise: u32,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FFEE,
            players: 4,
            max_steps: 2_000,
            max_bid_raise: 50,
        }
    }
}
