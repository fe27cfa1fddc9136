//! Conversions backing the optional serde support.
//!
//! Colors, brightness, and modes serialize as their textual forms, e.g.,
//! `"BrightCyan"`, `"#0c"`, `"#203040"`, `"Default"`, or `"Italic"`. Unset
//! colors serialize as the empty string. Mode sets serialize as sequences of
//! mode names.

use crate::color::{BasicColor, Brightness, Color, DefaultColor, PaletteColor, RgbColor};
use crate::err::Error;
use crate::mode::{Mode, ModeSet};

macro_rules! text_conversions {
    ($($name:ident),+ $(,)?) => {
        $(
            impl TryFrom<String> for $name {
                type Error = Error;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> Self {
                    value.to_string()
                }
            }
        )+
    };
}

text_conversions!(
    BasicColor,
    Brightness,
    DefaultColor,
    PaletteColor,
    RgbColor,
    Color,
    Mode
);

impl From<Vec<Mode>> for ModeSet {
    fn from(value: Vec<Mode>) -> Self {
        value.into_iter().collect()
    }
}

impl From<ModeSet> for Vec<Mode> {
    fn from(value: ModeSet) -> Self {
        value.modes().collect()
    }
}

// ----------------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_colors() -> Result<(), serde_json::Error> {
        for (color, json) in [
            (Color::Unset, "\"\""),
            (Color::Default, "\"Default\""),
            (Color::Basic(BasicColor::BrightCyan), "\"BrightCyan\""),
            (Color::Palette(PaletteColor(12)), "\"#0c\""),
            (Color::Rgb(RgbColor::new(32, 48, 64)), "\"#203040\""),
        ] {
            assert_eq!(serde_json::to_string(&color)?, json);
            assert_eq!(serde_json::from_str::<Color>(json)?, color);
        }

        assert_eq!(
            serde_json::from_str::<BasicColor>("\"bright magenta\"")?,
            BasicColor::BrightMagenta
        );
        assert_eq!(serde_json::to_string(&Brightness::Bright)?, "\"Bright\"");
        assert_eq!(serde_json::to_string(&DefaultColor)?, "\"Default\"");
        assert!(serde_json::from_str::<Color>("\"#12345\"").is_err());
        assert!(serde_json::from_str::<PaletteColor>("\"#123\"").is_err());
        Ok(())
    }

    #[test]
    fn test_modes() -> Result<(), serde_json::Error> {
        let set = Mode::Bold | Mode::Italic | Mode::Subscript;
        let json = serde_json::to_string(&set)?;
        assert_eq!(json, "[\"Bold\",\"Italic\",\"Subscript\"]");
        assert_eq!(serde_json::from_str::<ModeSet>(&json)?, set);
        assert_eq!(
            serde_json::from_str::<ModeSet>("[\"crossedout\"]")?,
            ModeSet::from(Mode::CrossedOut)
        );
        assert!(serde_json::from_str::<ModeSet>("[\"Blink\"]").is_err());
        assert_eq!(serde_json::to_string(&ModeSet::EMPTY)?, "[]");
        Ok(())
    }
}
