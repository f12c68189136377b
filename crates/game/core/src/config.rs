/// Battlefield configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Seed mixed into every attack and saving-throw roll.
    pub seed: u64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ACTIONS: usize = 12;

    // ===== rules constants =====
    /// Movement budget (in tiles) granted each turn when a template omits it.
    pub const DEFAULT_SPEED: u32 = 6;
    /// Armor class assumed when a template omits it.
    pub const DEFAULT_ARMOR_CLASS: u32 = 10;

    pub const DEFAULT_SEED: u64 = 0x5eed;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub const fn default_seed() -> u64 {
        Self::DEFAULT_SEED
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
