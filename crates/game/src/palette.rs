//! The fixed three-colour palette and classifier verdicts.

/// One palette token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Red card
    Red,
    /// Green card
    Green,
    /// Blue card
    Blue,
}

/// Every token a sequence may contain, in display order.
pub const PALETTE: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

impl Color {
    /// Lower-case name, as shown on the flash swatch.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output for one sampled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// A palette colour was recognised
    Color(Color),
    /// No frame, or every pixel fell outside the brightness band
    Unknown,
}

impl Verdict {
    /// The recognised colour, if any.
    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(c),
            Self::Unknown => None,
        }
    }

    /// Display name (`"unknown"` for [`Verdict::Unknown`]).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Color(c) => c.as_str(),
            Self::Unknown => "unknown",
        }
    }
}

impl From<Color> for Verdict {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}
