use crate::constants::MAX_SAVED_STATES;

/// # Config
/// Run-time switches for behaviour that differs between Chip-8 interpreters.
///
/// The defaults follow the later (SUPER-CHIP era) interpreters, except for the
/// 8XYE flag which keeps the masked byte unless told otherwise.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// FX55/FX65 leave I pointing just past the last register copied (COSMAC VIP)
    pub load_store_increments_i: bool,
    /// 8XYE stores 0/1 in VF rather than `Vx & 0x80`
    pub normalized_shift_flag: bool,
    /// How many previous states to keep for `rewind`; 0 disables rewinding
    pub history_depth: usize,
}

impl Config {
    pub fn cosmac_vip() -> Self {
        Config {
            load_store_increments_i: true,
            normalized_shift_flag: true,
            ..Config::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            load_store_increments_i: false,
            normalized_shift_flag: false,
            history_depth: MAX_SAVED_STATES,
        }
    }
}
