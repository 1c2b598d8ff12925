//! Physical Constants for ThermoGuard
//!
//! Coefficients of the Magnus dew point approximation and the international
//! barometric formula. Values follow the conventions used by Bosch for the
//! BME280 and by the International Standard Atmosphere.

// ===== STANDARD ATMOSPHERE =====

/// Standard atmospheric pressure at sea level (hPa/mbar).
///
/// Reference pressure `P0` of the barometric formula. Calibration replaces
/// it with the locally observed equivalent.
///
/// Source: International Standard Atmosphere (ISA)
pub const SEA_LEVEL_PRESSURE_HPA: f32 = 1013.25;

/// Standard sea level temperature (K).
///
/// `T0` of the barometric formula, 15 °C by international convention.
///
/// Source: International Standard Atmosphere (ISA)
pub const SEA_LEVEL_TEMPERATURE_K: f32 = 288.15;

/// Barometric temperature lapse rate (K/m).
///
/// Temperature gradient of the troposphere.
///
/// Source: International Standard Atmosphere (ISA)
pub const BAROMETRIC_LAPSE_RATE_K_PER_M: f32 = 0.0065;

/// Reference height of the barometric formula (m).
///
/// `H0 = T0 / gradT = 288.15 / 0.0065`, rounded the way the formula is
/// usually quoted.
pub const BAROMETRIC_REFERENCE_HEIGHT_M: f32 = 44330.0;

/// Barometric formula exponent.
///
/// `K0 = kappa / (kappa - 1)` with `kappa = 1.235`.
/// P = P0 * (1 - h/H0)^5.255
pub const BAROMETRIC_EXPONENT: f32 = 5.255;

/// Pascal per hectopascal.
///
/// The sensor reports pressure in Pa, everything downstream works in hPa.
pub const PA_PER_HPA: f32 = 100.0;

// ===== HUMIDITY AND DEW POINT PHYSICS =====

/// Magnus coefficient `a` over water (dimensionless).
///
/// Valid for -45 °C to 60 °C.
///
/// Source: Sonntag (1990), as quoted in the Sensirion dew point application note
pub const MAGNUS_A: f32 = 17.62;

/// Magnus coefficient `b` over water (°C).
///
/// Source: Sonntag (1990)
pub const MAGNUS_B_C: f32 = 243.12;

/// Upper bound of relative humidity (%).
pub const RELATIVE_HUMIDITY_MAX_PCT: f32 = 100.0;

// ===== TEMPERATURE SCALES =====

/// Fahrenheit degrees per Celsius degree.
pub const FAHRENHEIT_PER_CELSIUS: f32 = 1.8;

/// Fahrenheit reading at the freezing point of water (°F).
pub const FAHRENHEIT_OFFSET: f32 = 32.0;
