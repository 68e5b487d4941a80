//! Sequential color scale over per-country sighting totals.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::EmptyDomainError;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form, the shape map renderers take.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The 9-stop yellow-orange-red sequential ramp the dashboard uses.
pub const YL_OR_RD_9: [Rgb; 9] = [
    Rgb::new(255, 255, 204),
    Rgb::new(255, 237, 160),
    Rgb::new(254, 217, 118),
    Rgb::new(254, 178, 76),
    Rgb::new(253, 141, 60),
    Rgb::new(252, 78, 42),
    Rgb::new(227, 26, 28),
    Rgb::new(189, 0, 38),
    Rgb::new(128, 0, 38),
];

/// A fixed sequence of color stops interpolated piecewise-linearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRamp {
    stops: &'static [Rgb],
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::YL_OR_RD
    }
}

impl ColorRamp {
    /// The yellow-orange-red ramp.
    pub const YL_OR_RD: Self = Self {
        stops: &YL_OR_RD_9,
    };

    /// The ramp's color stops, start to end.
    #[must_use]
    pub const fn stops(self) -> &'static [Rgb] {
        self.stops
    }

    /// Samples the ramp at `t` in `[0, 1]`; out-of-range values clamp
    /// to the endpoints.
    #[must_use]
    pub fn sample(self, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        #[allow(clippy::cast_precision_loss)]
        let x = t * (self.stops.len() - 1) as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let segment = x.floor() as usize;
        if segment >= self.stops.len() - 1 {
            return self.stops[self.stops.len() - 1];
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = x - segment as f64;
        let start = self.stops[segment];
        let end = self.stops[segment + 1];
        Rgb {
            r: lerp_channel(start.r, end.r, fraction),
            g: lerp_channel(start.g, end.g, fraction),
            b: lerp_channel(start.b, end.b, fraction),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel(start: u8, end: u8, fraction: f64) -> u8 {
    (f64::from(end) - f64::from(start))
        .mul_add(fraction, f64::from(start))
        .round() as u8
}

/// Maps sighting totals onto a [`ColorRamp`] over a fixed domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScale {
    domain_min: u64,
    domain_max: u64,
    ramp: ColorRamp,
}

impl ColorScale {
    /// Lower end of the domain.
    #[must_use]
    pub const fn domain_min(&self) -> u64 {
        self.domain_min
    }

    /// Upper end of the domain.
    #[must_use]
    pub const fn domain_max(&self) -> u64 {
        self.domain_max
    }

    /// The ramp values map onto.
    #[must_use]
    pub const fn ramp(&self) -> ColorRamp {
        self.ramp
    }

    /// The color for `value`.
    ///
    /// Values outside the domain clamp to its endpoints. A degenerate
    /// domain (`min == max`) always yields the ramp start color.
    #[must_use]
    pub fn color(&self, value: u64) -> Rgb {
        let t = if self.domain_max > self.domain_min {
            let clamped = value.clamp(self.domain_min, self.domain_max);
            #[allow(clippy::cast_precision_loss)]
            {
                (clamped - self.domain_min) as f64 / (self.domain_max - self.domain_min) as f64
            }
        } else {
            0.0
        };
        self.ramp.sample(t)
    }
}

/// Builds a [`ColorScale`] spanning an observed value set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorScaleBuilder {
    ramp: ColorRamp,
}

impl ColorScaleBuilder {
    /// Creates a builder over the default yellow-orange-red ramp.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ramp to map onto.
    #[must_use]
    pub const fn with_ramp(mut self, ramp: ColorRamp) -> Self {
        self.ramp = ramp;
        self
    }

    /// Builds a scale whose domain spans the min and max of `values`.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyDomainError`] when `values` is empty.
    pub fn build(&self, values: &[u64]) -> Result<ColorScale, EmptyDomainError> {
        let (Some(domain_min), Some(domain_max)) = (
            values.iter().copied().min(),
            values.iter().copied().max(),
        ) else {
            return Err(EmptyDomainError);
        };

        Ok(ColorScale {
            domain_min,
            domain_max,
            ramp: self.ramp,
        })
    }
}

/// Which joined totals feed the color-scale domain.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum DomainPolicy {
    /// Every joined total, zero-filled countries included.
    #[default]
    IncludeZeroFill,
    /// Only countries with at least one recorded sighting.
    ObservedOnly,
}
