//! Terminal color representations.
//!
//! This module offers [`BasicColor`], [`PaletteColor`], [`RgbColor`], and
//! [`DefaultColor`] as the four kinds of colors understood by SGR escape
//! sequences. All of them convert into the uniform [`Color`], which also has an
//! [`Color::Unset`] variant for a color channel that has not been assigned yet.
//!
//! Every color has a textual form: the name for basic colors, `#xx` for
//! palette colors, `#xxxxxx` for RGB colors, and `Default` for the default
//! color. The [`core::str::FromStr`] implementations accept these forms
//! case-insensitively.
//!
//! ```
//! # use prettysgr::{BasicColor, Color, PaletteColor, RgbColor};
//! let color: Color = "bright-cyan".parse()?;
//! assert_eq!(color, Color::Basic(BasicColor::BrightCyan));
//!
//! let color: Color = "#0c".parse()?;
//! assert_eq!(color, Color::Palette(PaletteColor(12)));
//!
//! let color = Color::from(RgbColor::new(32, 48, 64));
//! assert_eq!(color.to_string(), "#203040");
//! # Ok::<(), prettysgr::err::Error>(())
//! ```

use core::fmt;
use core::iter::successors;
use core::str::FromStr;

use crate::err::Error;

// ====================================================================================================================
// Basic Color
// ====================================================================================================================

/// The sixteen basic colors originally defined by ECMA-48.
///
/// The first eight colors have normal brightness and the second eight colors
/// are their bright counterparts, with indices exactly 8 apart.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BasicColor {
    #[default]
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl BasicColor {
    const NAMES: [&'static str; 16] = [
        "Black",
        "Red",
        "Green",
        "Yellow",
        "Blue",
        "Magenta",
        "Cyan",
        "White",
        "BrightBlack",
        "BrightRed",
        "BrightGreen",
        "BrightYellow",
        "BrightBlue",
        "BrightMagenta",
        "BrightCyan",
        "BrightWhite",
    ];

    /// Get an iterator over all basic colors in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        successors(Some(Self::Black), |color| Self::try_from(*color as u8 + 1).ok())
    }

    /// Get this color's index.
    #[inline]
    pub const fn index(&self) -> u8 {
        *self as u8
    }

    /// Determine whether this color is bright.
    #[inline]
    pub const fn is_bright(&self) -> bool {
        8 <= *self as u8
    }

    /// Get this color's brightness.
    pub const fn brightness(&self) -> Brightness {
        if self.is_bright() {
            Brightness::Bright
        } else {
            Brightness::Normal
        }
    }

    /// Get the normal version of this color.
    ///
    /// If this color is bright, this method returns its counterpart with
    /// normal brightness. Otherwise, it returns the same color.
    #[must_use = "the only reason to invoke method is to access the returned value"]
    pub const fn normal(&self) -> Self {
        Self::from_index(self.index() & 0x7)
    }

    /// Get the bright version of this color.
    ///
    /// If this color has normal brightness, this method returns its bright
    /// counterpart. Otherwise, it returns the same color.
    #[must_use = "the only reason to invoke method is to access the returned value"]
    pub const fn bright(&self) -> Self {
        Self::from_index(self.index() | 0x8)
    }

    /// Get the version of this color with the given brightness.
    #[must_use = "the only reason to invoke method is to access the returned value"]
    pub const fn with_brightness(&self, brightness: Brightness) -> Self {
        match brightness {
            Brightness::Normal => self.normal(),
            Brightness::Bright => self.bright(),
        }
    }

    /// Get the palette color with the same meaning.
    #[inline]
    pub const fn to_palette(&self) -> PaletteColor {
        PaletteColor(*self as u8)
    }

    /// Get this color's name.
    pub const fn name(&self) -> &'static str {
        Self::NAMES[*self as usize]
    }

    const fn from_index(index: u8) -> Self {
        use self::BasicColor::*;

        match index & 0xf {
            0 => Black,
            1 => Red,
            2 => Green,
            3 => Yellow,
            4 => Blue,
            5 => Magenta,
            6 => Cyan,
            7 => White,
            8 => BrightBlack,
            9 => BrightRed,
            10 => BrightGreen,
            11 => BrightYellow,
            12 => BrightBlue,
            13 => BrightMagenta,
            14 => BrightCyan,
            _ => BrightWhite,
        }
    }
}

impl TryFrom<u8> for BasicColor {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 16 {
            Ok(Self::from_index(value))
        } else {
            Err(Error::InvalidBasicColorValue(value))
        }
    }
}

impl From<BasicColor> for u8 {
    fn from(value: BasicColor) -> Self {
        value as u8
    }
}

impl fmt::Display for BasicColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BasicColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let prefix = Brightness::Bright.name();
        let mut brightness = Brightness::Normal;
        let mut name = s;

        if prefix.len() < s.len()
            && s.is_char_boundary(prefix.len())
            && s[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            name = s[prefix.len()..].trim_start_matches([' ', '_', '-']);
            brightness = Brightness::Bright;
        }

        Self::all()
            .take(8)
            .find(|color| color.name().eq_ignore_ascii_case(name))
            .map(|color| color.with_brightness(brightness))
            .ok_or_else(|| Error::InvalidBasicColorText(s.to_owned()))
    }
}

// ====================================================================================================================
// Brightness
// ====================================================================================================================

/// The brightness of a basic color.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Brightness {
    #[default]
    Normal = 0,
    Bright = 1,
}

impl Brightness {
    /// Get this brightness' name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Bright => "Bright",
        }
    }
}

impl TryFrom<u8> for Brightness {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Bright),
            _ => Err(Error::InvalidBrightnessValue(value)),
        }
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Brightness {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Normal, Self::Bright]
            .into_iter()
            .find(|brightness| brightness.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidBrightnessText(s.to_owned()))
    }
}

// ====================================================================================================================
// Default Color
// ====================================================================================================================

/// The terminal's default color.
///
/// Setting a channel to the default color resets it to whatever the terminal
/// considers its default appearance.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DefaultColor;

impl fmt::Display for DefaultColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Default")
    }
}

impl FromStr for DefaultColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("Default") {
            Ok(DefaultColor)
        } else {
            Err(Error::InvalidDefaultColorText(s.to_owned()))
        }
    }
}

// ====================================================================================================================
// Palette Color
// ====================================================================================================================

/// A color from the 256-color palette.
///
/// The first sixteen palette colors coincide with the basic colors.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaletteColor(pub u8);

impl From<BasicColor> for PaletteColor {
    fn from(value: BasicColor) -> Self {
        value.to_palette()
    }
}

impl From<u8> for PaletteColor {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}", self.0)
    }
}

impl FromStr for PaletteColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s.trim(), 2)
            .map(|value| Self(value as u8))
            .ok_or_else(|| Error::InvalidPaletteColorText(s.trim().to_owned()))
    }
}

// ====================================================================================================================
// RGB Color
// ====================================================================================================================

/// A 24-bit color with 8-bit red, green, and blue components.
///
/// The components are packed big-endian, i.e., as `R<<16 | G<<8 | B`.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RgbColor(u32);

impl RgbColor {
    /// Create a new RGB color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self((r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Create a new RGB color from its packed form, ignoring the top byte.
    pub const fn from_u32(value: u32) -> Self {
        Self(value & 0xff_ffff)
    }

    /// Get the packed form.
    #[inline]
    pub const fn to_u32(&self) -> u32 {
        self.0
    }

    /// Get the red component.
    #[inline]
    pub const fn r(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Get the green component.
    #[inline]
    pub const fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Get the blue component.
    #[inline]
    pub const fn b(&self) -> u8 {
        self.0 as u8
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from(value: [u8; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl FromStr for RgbColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s.trim(), 6)
            .map(Self)
            .ok_or_else(|| Error::InvalidRgbColorText(s.trim().to_owned()))
    }
}

/// Parse `#` followed by exactly `digits` hexadecimal digits.
fn parse_hex(s: &str, digits: usize) -> Option<u32> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != digits || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    u32::from_str_radix(hex, 16).ok()
}

// ====================================================================================================================
// Color
// ====================================================================================================================

/// A uniform color value.
///
/// A color is either unset, the terminal's default color, a basic color, a
/// palette color, or an RGB color. [`Color::Unset`] is the default value and
/// distinct from [`Color::Default`]: It denotes a channel that has not been
/// assigned, which renders as nothing, whereas the default color renders as
/// an explicit reset of the channel.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    #[default]
    Unset,
    Default,
    Basic(BasicColor),
    Palette(PaletteColor),
    Rgb(RgbColor),
}

impl Color {
    const KIND_MASK: u32 = 0xff00_0000;
    const KIND_UNSET: u32 = 0x0000_0000;
    const KIND_DEFAULT: u32 = 0x0100_0000;
    const KIND_BASIC: u32 = 0x0200_0000;
    const KIND_PALETTE: u32 = 0x0300_0000;
    const KIND_RGB: u32 = 0x0400_0000;

    /// Determine whether this color is unset.
    #[inline]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Determine whether this color is the default color.
    #[inline]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Replace an unset color with the default color.
    #[must_use = "the only reason to invoke method is to access the returned value"]
    pub const fn or_default(self) -> Self {
        match self {
            Self::Unset => Self::Default,
            _ => self,
        }
    }

    /// Get the basic color, if this color is one.
    pub const fn basic_color(&self) -> Option<BasicColor> {
        match *self {
            Self::Basic(color) => Some(color),
            _ => None,
        }
    }

    /// Get the palette color, if this color is one.
    pub const fn palette_color(&self) -> Option<PaletteColor> {
        match *self {
            Self::Palette(color) => Some(color),
            _ => None,
        }
    }

    /// Get the RGB color, if this color is one.
    pub const fn rgb_color(&self) -> Option<RgbColor> {
        match *self {
            Self::Rgb(color) => Some(color),
            _ => None,
        }
    }

    /// Get the default color, if this color is it.
    pub const fn default_color(&self) -> Option<DefaultColor> {
        match *self {
            Self::Default => Some(DefaultColor),
            _ => None,
        }
    }
}

impl From<BasicColor> for Color {
    fn from(value: BasicColor) -> Self {
        Self::Basic(value)
    }
}

impl From<PaletteColor> for Color {
    fn from(value: PaletteColor) -> Self {
        Self::Palette(value)
    }
}

impl From<RgbColor> for Color {
    fn from(value: RgbColor) -> Self {
        Self::Rgb(value)
    }
}

impl From<DefaultColor> for Color {
    fn from(_: DefaultColor) -> Self {
        Self::Default
    }
}

impl From<Color> for u32 {
    /// Pack the color into 32 bits, with the kind in the top byte.
    fn from(value: Color) -> Self {
        match value {
            Color::Unset => Color::KIND_UNSET,
            Color::Default => Color::KIND_DEFAULT,
            Color::Basic(color) => Color::KIND_BASIC | color as u32,
            Color::Palette(color) => Color::KIND_PALETTE | color.0 as u32,
            Color::Rgb(color) => Color::KIND_RGB | color.to_u32(),
        }
    }
}

impl TryFrom<u32> for Color {
    type Error = Error;

    /// Unpack a color, rejecting payload bits outside the kind's range.
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        let payload = value & !Self::KIND_MASK;
        match value & Self::KIND_MASK {
            Self::KIND_UNSET if payload == 0 => Ok(Self::Unset),
            Self::KIND_DEFAULT if payload == 0 => Ok(Self::Default),
            Self::KIND_BASIC if payload <= 0xff => {
                BasicColor::try_from(payload as u8).map(Self::Basic)
            }
            Self::KIND_PALETTE if payload <= 0xff => {
                Ok(Self::Palette(PaletteColor(payload as u8)))
            }
            Self::KIND_RGB => Ok(Self::Rgb(RgbColor::from_u32(payload))),
            _ => Err(Error::InvalidColorValue(value)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => Ok(()),
            Self::Default => fmt::Display::fmt(&DefaultColor, f),
            Self::Basic(color) => fmt::Display::fmt(color, f),
            Self::Palette(color) => fmt::Display::fmt(color, f),
            Self::Rgb(color) => fmt::Display::fmt(color, f),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();

        if text.is_empty() {
            return Ok(Self::Unset);
        } else if text.starts_with('#') && text.len() == 3 {
            return text
                .parse::<PaletteColor>()
                .map(Self::Palette)
                .map_err(|err| Error::color_text(text, Some(err)));
        } else if text.starts_with('#') && text.len() == 7 {
            return text
                .parse::<RgbColor>()
                .map(Self::Rgb)
                .map_err(|err| Error::color_text(text, Some(err)));
        } else if let Ok(DefaultColor) = text.parse::<DefaultColor>() {
            return Ok(Self::Default);
        }

        text.parse::<BasicColor>()
            .map(Self::Basic)
            .map_err(|_| Error::color_text(text, None))
    }
}

// ----------------------------------------------------------------------------------------------------------
