//! Battery telemetry snapshot

/// One point-in-time reading of everything the fuel gauge reports.
///
/// Produced by a burst of independent register reads; the gauge driver does
/// no averaging or caching, so two snapshots taken back to back may differ.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryTelemetry {
    /// Battery voltage in volts.
    pub voltage_v: f32,
    /// Battery current in amperes, negative while discharging.
    pub current_a: f32,
    /// Remaining charge as a percentage of full capacity.
    pub charge_percent: u16,
    /// Average power in milliwatts, negative while discharging.
    pub average_power_mw: i16,
    /// Battery temperature in degrees Celsius.
    pub temperature_c: f32,
    /// Charge/discharge cycle counter.
    pub cycle_count: u16,
}
