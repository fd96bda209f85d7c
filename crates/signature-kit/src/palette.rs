//! Fixed pen-color palette and cursive font families offered by both
//! capture modes.

/// The three pen colors a signer can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenColor {
    #[default]
    Black,
    Red,
    Blue,
}

pub const PEN_COLORS: [PenColor; 3] = [PenColor::Black, PenColor::Red, PenColor::Blue];

impl PenColor {
    /// CSS hex value, the form the asset store persists.
    pub fn hex(self) -> &'static str {
        match self {
            PenColor::Black => "#000000",
            PenColor::Red => "#ff0000",
            PenColor::Blue => "#0000ff",
        }
    }

    pub fn rgba(self) -> [u8; 4] {
        match self {
            PenColor::Black => [0x00, 0x00, 0x00, 0xff],
            PenColor::Red => [0xff, 0x00, 0x00, 0xff],
            PenColor::Blue => [0x00, 0x00, 0xff, 0xff],
        }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        PEN_COLORS.into_iter().find(|c| c.hex().eq_ignore_ascii_case(hex))
    }
}

/// The four cursive families offered for typed signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureFont {
    #[default]
    DancingScript,
    GreatVibes,
    KaushanScript,
    Parisienne,
}

pub const SIGNATURE_FONTS: [SignatureFont; 4] = [
    SignatureFont::DancingScript,
    SignatureFont::GreatVibes,
    SignatureFont::KaushanScript,
    SignatureFont::Parisienne,
];

impl SignatureFont {
    pub fn name(self) -> &'static str {
        match self {
            SignatureFont::DancingScript => "Dancing Script",
            SignatureFont::GreatVibes => "Great Vibes",
            SignatureFont::KaushanScript => "Kaushan Script",
            SignatureFont::Parisienne => "Parisienne",
        }
    }

    /// The `font-family` value stored alongside typed assets so the host can
    /// re-render previews.
    pub fn css_value(self) -> &'static str {
        match self {
            SignatureFont::DancingScript => "\"Dancing Script\", cursive",
            SignatureFont::GreatVibes => "\"Great Vibes\", cursive",
            SignatureFont::KaushanScript => "\"Kaushan Script\", cursive",
            SignatureFont::Parisienne => "\"Parisienne\", cursive",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        SIGNATURE_FONTS
            .into_iter()
            .find(|f| f.name() == name || f.css_value() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_round_trips_through_hex() {
        for color in PEN_COLORS {
            assert_eq!(PenColor::from_hex(color.hex()), Some(color));
        }
        assert_eq!(PenColor::from_hex("#00FF00"), None);
    }

    #[test]
    fn fonts_resolve_by_either_form() {
        for font in SIGNATURE_FONTS {
            assert_eq!(SignatureFont::from_name(font.name()), Some(font));
            assert_eq!(SignatureFont::from_name(font.css_value()), Some(font));
        }
    }
}
