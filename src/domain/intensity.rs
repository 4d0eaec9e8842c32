use serde::Serialize;

/// Modified Mercalli intensity level derived from a Community Decimal
/// Intensity (CDI) value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Intensity {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
    VIII,
    IX,
    X,
}

impl Intensity {
    /// Classify a CDI value by rounding to the nearest level.
    ///
    /// Values below the scale clamp to `I`, values above to `X`.
    /// Returns `None` for non-finite input.
    pub fn from_cdi(cdi: f64) -> Option<Intensity> {
        if !cdi.is_finite() {
            return None;
        }
        let level = match cdi.round() {
            l if l <= 1.0 => Intensity::I,
            l if l <= 2.0 => Intensity::II,
            l if l <= 3.0 => Intensity::III,
            l if l <= 4.0 => Intensity::IV,
            l if l <= 5.0 => Intensity::V,
            l if l <= 6.0 => Intensity::VI,
            l if l <= 7.0 => Intensity::VII,
            l if l <= 8.0 => Intensity::VIII,
            l if l <= 9.0 => Intensity::IX,
            _ => Intensity::X,
        };
        Some(level)
    }

    /// Parse a CDI label such as `"4.1"`.
    pub fn from_label(label: &str) -> Option<Intensity> {
        label.trim().parse::<f64>().ok().and_then(Self::from_cdi)
    }

    pub fn roman(self) -> &'static str {
        match self {
            Intensity::I => "I",
            Intensity::II => "II",
            Intensity::III => "III",
            Intensity::IV => "IV",
            Intensity::V => "V",
            Intensity::VI => "VI",
            Intensity::VII => "VII",
            Intensity::VIII => "VIII",
            Intensity::IX => "IX",
            Intensity::X => "X+",
        }
    }

    /// Perceived shaking, as worded on the USGS intensity scale.
    pub fn shaking(self) -> &'static str {
        match self {
            Intensity::I => "Not felt",
            Intensity::II | Intensity::III => "Weak",
            Intensity::IV => "Light",
            Intensity::V => "Moderate",
            Intensity::VI => "Strong",
            Intensity::VII => "Very strong",
            Intensity::VIII => "Severe",
            Intensity::IX => "Violent",
            Intensity::X => "Extreme",
        }
    }
}
