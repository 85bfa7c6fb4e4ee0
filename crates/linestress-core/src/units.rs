//! Compile-time unit safety for thermal-rating quantities.
//!
//! Prevents mixing incompatible units like amps and MVA, or Celsius and Kelvin.
//!
//! # Design Philosophy
//!
//! A thermal rating moves between several physical quantities:
//! - Conductor current (A) out of the heat balance
//! - Apparent power (MVA) for comparison with scheduled flows
//! - Line-to-line voltage (kV) for the three-phase conversion
//! - Temperatures (°C, and K inside the radiative term)
//!
//! Using raw `f64` values throughout makes it easy to feed a current where an
//! MVA figure is expected. The newtypes below keep those conversions explicit.
//!
//! # Zero Runtime Overhead
//!
//! All types use `#[repr(transparent)]` ensuring they have the same memory
//! layout as `f64`.
//!
//! # Usage
//!
//! ```
//! use linestress_core::units::{Amperes, Kilovolts};
//!
//! let rating = Amperes(1000.0);
//! let mva = rating.to_three_phase_mva(Kilovolts(138.0));
//! assert!((mva.value() - 239.02).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Macro to implement common arithmetic operations for unit types
macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.4} {}", self.0, $unit_name)
            }
        }

        impl $type {
            /// Create a new value
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Check if value is finite
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Clamp value to range
            #[inline]
            pub fn clamp(self, min: Self, max: Self) -> Self {
                Self(self.0.clamp(min.0, max.0))
            }

            /// Maximum of two values
            #[inline]
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }
        }
    };
}

// =============================================================================
// Electrical Units
// =============================================================================

/// Conductor current in amperes (A)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Amperes(pub f64);

impl_unit_ops!(Amperes, "A");

/// Apparent power in megavolt-amperes (MVA)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MegavoltAmperes(pub f64);

impl_unit_ops!(MegavoltAmperes, "MVA");

/// Line-to-line voltage in kilovolts (kV)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilovolts(pub f64);

impl_unit_ops!(Kilovolts, "kV");

impl Amperes {
    /// Three-phase apparent power carried at this current: S = √3 · I · V_LL
    #[inline]
    pub fn to_three_phase_mva(self, voltage: Kilovolts) -> MegavoltAmperes {
        MegavoltAmperes(3f64.sqrt() * self.0 * voltage.0 * 1e3 * 1e-6)
    }
}

// =============================================================================
// Thermal Units
// =============================================================================

/// Temperature in degrees Celsius (°C)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(pub f64);

impl_unit_ops!(Celsius, "°C");

impl Celsius {
    /// Absolute temperature in kelvin
    #[inline]
    pub fn to_kelvin(self) -> f64 {
        self.0 + 273.15
    }
}

// =============================================================================
// Length Conversions
// =============================================================================

/// Metres per statute mile
pub const METERS_PER_MILE: f64 = 1609.344;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;
