// mt-core/src/units.rs

use uom::si::f64::{Pressure as UomPressure, Ratio as UomRatio};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;

#[inline]
pub fn kpa(v: f64) -> Pressure {
    use uom::si::pressure::kilopascal;
    Pressure::new::<kilopascal>(v)
}

/// Ratio of two vapor pressures, i.e. the relative volatility of `light`
/// with respect to `heavy` under Raoult's law.
#[inline]
pub fn pressure_ratio(light: Pressure, heavy: Pressure) -> Ratio {
    light / heavy
}
