/// Camera-system heat and overheat bookkeeping.
///
/// `heat` stays within `[0, MAX_HEAT]`. `overheated` is set when heat hits the
/// ceiling and cleared only once the cooldown has fully elapsed or the session
/// is reset.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatState {
    pub heat: f64,
    pub overheated: bool,
    /// Milliseconds of cooldown accumulated. Only meaningful while overheated.
    pub cooldown_elapsed_ms: u64,
}

impl HeatState {
    pub const MAX_HEAT: f64 = 100.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Heat rounded to the nearest whole percent, as shown on the HUD.
    pub fn percent(&self) -> u8 {
        self.heat.round().clamp(0.0, Self::MAX_HEAT) as u8
    }
}
