//! Helper module with this crate's error type.
//!
//! Errors fall into two groups. Text errors report a malformed textual literal
//! for a color, brightness, or mode and carry the offending text. Value errors
//! report a numeric value outside the enumeration it is supposed to belong to
//! and carry the offending value. I/O errors raised by a [`Writer`]'s sink are
//! not part of this taxonomy; they are passed through as [`std::io::Error`]s.
//!
//! [`Writer`]: crate::Writer

/// An invalid textual literal or numeric value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A color literal that is none of the known color notations.
    #[error("invalid color text {text:?}")]
    InvalidColorText {
        text: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// A basic color literal that is not one of the sixteen color names.
    #[error("invalid basic color text {0:?}")]
    InvalidBasicColorText(String),

    /// A default color literal other than `Default`.
    #[error("invalid default color text {0:?}")]
    InvalidDefaultColorText(String),

    /// A palette color literal other than `#` followed by two hex digits.
    #[error("invalid palette color text {0:?}")]
    InvalidPaletteColorText(String),

    /// An RGB color literal other than `#` followed by six hex digits.
    #[error("invalid rgb color text {0:?}")]
    InvalidRgbColorText(String),

    /// A brightness literal other than `Normal` or `Bright`.
    #[error("invalid brightness text {0:?}")]
    InvalidBrightnessText(String),

    /// A mode literal that is not one of the mode names.
    #[error("invalid mode text {0:?}")]
    InvalidModeText(String),

    /// A packed color value with an unknown tag or an out-of-range payload.
    #[error("invalid color value 0x{0:08x}")]
    InvalidColorValue(u32),

    /// A basic color index outside `0..=15`.
    #[error("invalid basic color value {0}")]
    InvalidBasicColorValue(u8),

    /// A brightness value outside `0..=1`.
    #[error("invalid brightness value {0}")]
    InvalidBrightnessValue(u8),

    /// A mode bit position outside `0..=14`.
    #[error("invalid mode value {0}")]
    InvalidModeValue(u8),
}

impl Error {
    /// Determine whether this error reports a malformed textual literal.
    pub fn is_text_error(&self) -> bool {
        self.text().is_some()
    }

    /// Get the offending text of a text error.
    pub fn text(&self) -> Option<&str> {
        use self::Error::*;

        match self {
            InvalidColorText { text, .. } => Some(text),
            InvalidBasicColorText(text)
            | InvalidDefaultColorText(text)
            | InvalidPaletteColorText(text)
            | InvalidRgbColorText(text)
            | InvalidBrightnessText(text)
            | InvalidModeText(text) => Some(text),
            InvalidColorValue(_)
            | InvalidBasicColorValue(_)
            | InvalidBrightnessValue(_)
            | InvalidModeValue(_) => None,
        }
    }

    pub(crate) fn color_text(text: &str, source: Option<Error>) -> Self {
        Self::InvalidColorText {
            text: text.to_owned(),
            source: source.map(Box::new),
        }
    }
}

// ----------------------------------------------------------------------------------------------------------
