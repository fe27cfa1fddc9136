//! Individual SGR commands.
//!
//! A [`Command`] is a single select-graphic-rendition instruction, i.e., a
//! numeric [`CommandCode`] followed by up to four numeric arguments. It is
//! packed into a `u64`:
//!
//!   * bits 0 to 7 hold the code,
//!   * bits 8 to 39 hold up to four argument bytes, with argument `i` in byte
//!     `i + 1`,
//!   * bits 56 to 59 hold the argument count,
//!   * bit 60 marks the command as valid.
//!
//! The all-zero command is the canonical no-op. It, as well as any other
//! command without the valid flag, is skipped when rendering a
//! [`Sequence`](crate::Sequence).
//!
//! Every command without arguments is also available as an associated
//! constant, e.g., [`Command::SET_BOLD`]. Commands that set a color are best
//! created with [`Command::set_foreground_color`],
//! [`Command::set_background_color`], and [`Command::set_underline_color`],
//! which pick the most compact encoding for the given color.
//!
//! ```
//! # use prettysgr::{BasicColor, Command, RgbColor};
//! let cmd = Command::set_foreground_color(RgbColor::new(32, 48, 64));
//! assert_eq!(cmd.to_string(), "\x1b[38;2;32;48;64m");
//! assert_eq!(format!("{:?}", cmd), "SetForegroundColor(#203040)");
//!
//! let cmd = Command::set_background_color(BasicColor::BrightCyan);
//! assert_eq!(cmd, Command::SET_BACKGROUND_COLOR_BRIGHT_CYAN);
//! assert_eq!(cmd.to_string(), "\x1b[106m");
//! ```

use core::fmt;

use crate::color::{BasicColor, Color, PaletteColor, RgbColor};
use self::CommandCode::*;

macro_rules! define_codes {
    ( $( $name:ident = $value:literal => $constant:ident ),+ $(,)? ) => {
        /// The enumeration of SGR command codes.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum CommandCode {
            $( $name = $value ),+
        }

        impl CommandCode {
            /// All codes in ascending numeric order.
            const ALL: &'static [CommandCode] = &[ $( CommandCode::$name ),+ ];

            /// Get this code's name.
            pub const fn name(&self) -> &'static str {
                match *self {
                    $( CommandCode::$name => stringify!($name) ),+
                }
            }
        }

        impl Command {
            $(
                #[doc = concat!("The `", stringify!($name), "` command.")]
                pub const $constant: Command = Command::new(CommandCode::$name);
            )+
        }
    };
}

define_codes! {
    ResetAll = 0 => RESET_ALL,
    SetBold = 1 => SET_BOLD,
    SetFaint = 2 => SET_FAINT,
    SetItalic = 3 => SET_ITALIC,
    SetUnderlined = 4 => SET_UNDERLINED,
    SetSlowBlink = 5 => SET_SLOW_BLINK,
    SetRapidBlink = 6 => SET_RAPID_BLINK,
    SetReversed = 7 => SET_REVERSED,
    SetConcealed = 8 => SET_CONCEALED,
    SetCrossedOut = 9 => SET_CROSSED_OUT,
    SetDoublyUnderlined = 21 => SET_DOUBLY_UNDERLINED,
    ResetBoldAndFaint = 22 => RESET_BOLD_AND_FAINT,
    ResetItalic = 23 => RESET_ITALIC,
    ResetAllUnderlines = 24 => RESET_ALL_UNDERLINES,
    ResetAllBlinks = 25 => RESET_ALL_BLINKS,
    ResetReversed = 27 => RESET_REVERSED,
    ResetConcealed = 28 => RESET_CONCEALED,
    ResetCrossedOut = 29 => RESET_CROSSED_OUT,
    SetForegroundColorBlack = 30 => SET_FOREGROUND_COLOR_BLACK,
    SetForegroundColorRed = 31 => SET_FOREGROUND_COLOR_RED,
    SetForegroundColorGreen = 32 => SET_FOREGROUND_COLOR_GREEN,
    SetForegroundColorYellow = 33 => SET_FOREGROUND_COLOR_YELLOW,
    SetForegroundColorBlue = 34 => SET_FOREGROUND_COLOR_BLUE,
    SetForegroundColorMagenta = 35 => SET_FOREGROUND_COLOR_MAGENTA,
    SetForegroundColorCyan = 36 => SET_FOREGROUND_COLOR_CYAN,
    SetForegroundColorWhite = 37 => SET_FOREGROUND_COLOR_WHITE,
    SetForegroundColor = 38 => SET_FOREGROUND_COLOR,
    ResetForegroundColor = 39 => RESET_FOREGROUND_COLOR,
    SetBackgroundColorBlack = 40 => SET_BACKGROUND_COLOR_BLACK,
    SetBackgroundColorRed = 41 => SET_BACKGROUND_COLOR_RED,
    SetBackgroundColorGreen = 42 => SET_BACKGROUND_COLOR_GREEN,
    SetBackgroundColorYellow = 43 => SET_BACKGROUND_COLOR_YELLOW,
    SetBackgroundColorBlue = 44 => SET_BACKGROUND_COLOR_BLUE,
    SetBackgroundColorMagenta = 45 => SET_BACKGROUND_COLOR_MAGENTA,
    SetBackgroundColorCyan = 46 => SET_BACKGROUND_COLOR_CYAN,
    SetBackgroundColorWhite = 47 => SET_BACKGROUND_COLOR_WHITE,
    SetBackgroundColor = 48 => SET_BACKGROUND_COLOR,
    ResetBackgroundColor = 49 => RESET_BACKGROUND_COLOR,
    SetFramed = 51 => SET_FRAMED,
    SetEncircled = 52 => SET_ENCIRCLED,
    SetOverlined = 53 => SET_OVERLINED,
    ResetFramedAndEncircled = 54 => RESET_FRAMED_AND_ENCIRCLED,
    ResetOverlined = 55 => RESET_OVERLINED,
    SetUnderlineColor = 58 => SET_UNDERLINE_COLOR,
    ResetUnderlineColor = 59 => RESET_UNDERLINE_COLOR,
    SetSuperscript = 73 => SET_SUPERSCRIPT,
    SetSubscript = 74 => SET_SUBSCRIPT,
    ResetSuperscriptAndSubscript = 75 => RESET_SUPERSCRIPT_AND_SUBSCRIPT,
    SetForegroundColorBrightBlack = 90 => SET_FOREGROUND_COLOR_BRIGHT_BLACK,
    SetForegroundColorBrightRed = 91 => SET_FOREGROUND_COLOR_BRIGHT_RED,
    SetForegroundColorBrightGreen = 92 => SET_FOREGROUND_COLOR_BRIGHT_GREEN,
    SetForegroundColorBrightYellow = 93 => SET_FOREGROUND_COLOR_BRIGHT_YELLOW,
    SetForegroundColorBrightBlue = 94 => SET_FOREGROUND_COLOR_BRIGHT_BLUE,
    SetForegroundColorBrightMagenta = 95 => SET_FOREGROUND_COLOR_BRIGHT_MAGENTA,
    SetForegroundColorBrightCyan = 96 => SET_FOREGROUND_COLOR_BRIGHT_CYAN,
    SetForegroundColorBrightWhite = 97 => SET_FOREGROUND_COLOR_BRIGHT_WHITE,
    SetBackgroundColorBrightBlack = 100 => SET_BACKGROUND_COLOR_BRIGHT_BLACK,
    SetBackgroundColorBrightRed = 101 => SET_BACKGROUND_COLOR_BRIGHT_RED,
    SetBackgroundColorBrightGreen = 102 => SET_BACKGROUND_COLOR_BRIGHT_GREEN,
    SetBackgroundColorBrightYellow = 103 => SET_BACKGROUND_COLOR_BRIGHT_YELLOW,
    SetBackgroundColorBrightBlue = 104 => SET_BACKGROUND_COLOR_BRIGHT_BLUE,
    SetBackgroundColorBrightMagenta = 105 => SET_BACKGROUND_COLOR_BRIGHT_MAGENTA,
    SetBackgroundColorBrightCyan = 106 => SET_BACKGROUND_COLOR_BRIGHT_CYAN,
    SetBackgroundColorBrightWhite = 107 => SET_BACKGROUND_COLOR_BRIGHT_WHITE,
}

impl CommandCode {
    /// Get an iterator over all codes in ascending numeric order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::ALL.iter().copied()
    }

    /// Determine whether this code sets a color from its arguments.
    pub const fn is_generic_color(&self) -> bool {
        matches!(
            *self,
            Self::SetForegroundColor | Self::SetBackgroundColor | Self::SetUnderlineColor
        )
    }
}

impl TryFrom<u8> for CommandCode {
    type Error = u8;

    /// Look up the code with the given value, returning the value on failure.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .binary_search_by_key(&value, |code| *code as u8)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(value)
    }
}

impl From<CommandCode> for u8 {
    fn from(value: CommandCode) -> Self {
        value as u8
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ====================================================================================================================
// Color Codes
// ====================================================================================================================

const FOREGROUND_BASIC: [CommandCode; 16] = [
    SetForegroundColorBlack,
    SetForegroundColorRed,
    SetForegroundColorGreen,
    SetForegroundColorYellow,
    SetForegroundColorBlue,
    SetForegroundColorMagenta,
    SetForegroundColorCyan,
    SetForegroundColorWhite,
    SetForegroundColorBrightBlack,
    SetForegroundColorBrightRed,
    SetForegroundColorBrightGreen,
    SetForegroundColorBrightYellow,
    SetForegroundColorBrightBlue,
    SetForegroundColorBrightMagenta,
    SetForegroundColorBrightCyan,
    SetForegroundColorBrightWhite,
];

const BACKGROUND_BASIC: [CommandCode; 16] = [
    SetBackgroundColorBlack,
    SetBackgroundColorRed,
    SetBackgroundColorGreen,
    SetBackgroundColorYellow,
    SetBackgroundColorBlue,
    SetBackgroundColorMagenta,
    SetBackgroundColorCyan,
    SetBackgroundColorWhite,
    SetBackgroundColorBrightBlack,
    SetBackgroundColorBrightRed,
    SetBackgroundColorBrightGreen,
    SetBackgroundColorBrightYellow,
    SetBackgroundColorBrightBlue,
    SetBackgroundColorBrightMagenta,
    SetBackgroundColorBrightCyan,
    SetBackgroundColorBrightWhite,
];

/// The codes for setting one color channel.
struct ColorCodes {
    basic: Option<&'static [CommandCode; 16]>,
    set: CommandCode,
    reset: CommandCode,
}

const FOREGROUND: ColorCodes = ColorCodes {
    basic: Some(&FOREGROUND_BASIC),
    set: SetForegroundColor,
    reset: ResetForegroundColor,
};

const BACKGROUND: ColorCodes = ColorCodes {
    basic: Some(&BACKGROUND_BASIC),
    set: SetBackgroundColor,
    reset: ResetBackgroundColor,
};

// There is no SGR code for setting the underline to a basic color.
const UNDERLINE: ColorCodes = ColorCodes {
    basic: None,
    set: SetUnderlineColor,
    reset: ResetUnderlineColor,
};

/// The selector argument for a palette color.
const SELECT_PALETTE: u8 = 5;
/// The selector argument for an RGB color.
const SELECT_RGB: u8 = 2;

// ====================================================================================================================
// Command
// ====================================================================================================================

/// A single SGR command packed into 64 bits.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Command(u64);

impl Command {
    const CODE_MASK: u64 = 0xff;
    const COUNT_SHIFT: u32 = 56;
    const COUNT_MASK: u64 = 0x0f << Self::COUNT_SHIFT;
    const VALID: u64 = 1 << 60;

    /// The maximum number of arguments.
    pub const MAX_ARGS: usize = 4;

    /// The no-op command.
    pub const ZERO: Command = Command(0);

    /// Create a new command without arguments.
    pub const fn new(code: CommandCode) -> Self {
        Self(Self::VALID | code as u64)
    }

    /// Create a new command with arguments.
    ///
    /// Arguments beyond the first four are ignored.
    pub fn with_args(code: CommandCode, args: &[u8]) -> Self {
        let mut bits = Self::VALID | code as u64;
        let mut count = 0;
        for (index, arg) in args.iter().take(Self::MAX_ARGS).enumerate() {
            bits |= (*arg as u64) << ((index + 1) * 8);
            count += 1;
        }

        Self(bits | (count << Self::COUNT_SHIFT))
    }

    /// Create the command that sets the foreground color.
    ///
    /// The default color maps to `ResetForegroundColor`, basic colors map to
    /// their dedicated codes, and palette as well as RGB colors map to
    /// `SetForegroundColor` with arguments. An unset color maps to the no-op
    /// command.
    pub fn set_foreground_color<C: Into<Color>>(color: C) -> Self {
        Self::set_color(&FOREGROUND, color.into())
    }

    /// Create the command that sets the background color.
    ///
    /// The mapping is the same as for [`Command::set_foreground_color`], only
    /// with background codes.
    pub fn set_background_color<C: Into<Color>>(color: C) -> Self {
        Self::set_color(&BACKGROUND, color.into())
    }

    /// Create the command that sets the underline color.
    ///
    /// Since SGR has no dedicated codes for basic underline colors, basic
    /// colors are encoded as the equivalent palette colors.
    pub fn set_underline_color<C: Into<Color>>(color: C) -> Self {
        Self::set_color(&UNDERLINE, color.into())
    }

    fn set_color(codes: &ColorCodes, color: Color) -> Self {
        match color {
            Color::Unset => Self::ZERO,
            Color::Default => Self::new(codes.reset),
            Color::Basic(basic) => match codes.basic {
                Some(table) => Self::new(table[basic as usize]),
                None => Self::with_args(codes.set, &[SELECT_PALETTE, basic.index()]),
            },
            Color::Palette(palette) => Self::with_args(codes.set, &[SELECT_PALETTE, palette.0]),
            Color::Rgb(rgb) => {
                Self::with_args(codes.set, &[SELECT_RGB, rgb.r(), rgb.g(), rgb.b()])
            }
        }
    }

    /// Create a command from its packed bits, without validation.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Get the packed bits.
    #[inline]
    pub const fn to_bits(&self) -> u64 {
        self.0
    }

    /// Determine whether this command is the all-zero no-op.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Determine whether this command carries the valid flag.
    ///
    /// Commands without the flag are skipped when rendering.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 & Self::VALID != 0
    }

    /// Get the raw code byte.
    #[inline]
    pub const fn code_value(&self) -> u8 {
        (self.0 & Self::CODE_MASK) as u8
    }

    /// Get the code, if it is a known one.
    pub fn code(&self) -> Option<CommandCode> {
        CommandCode::try_from(self.code_value()).ok()
    }

    /// Get the number of arguments.
    #[inline]
    pub const fn arg_count(&self) -> usize {
        ((self.0 & Self::COUNT_MASK) >> Self::COUNT_SHIFT) as usize
    }

    /// Get the argument with the given index.
    pub const fn arg(&self, index: usize) -> Option<u8> {
        if index < self.arg_count() && index < Self::MAX_ARGS {
            Some((self.0 >> ((index + 1) * 8)) as u8)
        } else {
            None
        }
    }

    /// Get an iterator over the arguments.
    pub fn args(&self) -> impl Iterator<Item = u8> {
        let this = *self;
        (0..this.arg_count().min(Self::MAX_ARGS)).filter_map(move |index| this.arg(index))
    }

    /// Get the color set by this command.
    ///
    /// This method returns `None` for commands that do not set a color and
    /// for generic color commands with malformed arguments. Basic underline
    /// colors come back as palette colors.
    pub fn color(&self) -> Option<Color> {
        let code = self.code()?;
        match code {
            ResetForegroundColor | ResetBackgroundColor | ResetUnderlineColor => {
                return Some(Color::Default);
            }
            SetForegroundColor | SetBackgroundColor | SetUnderlineColor => {
                return match (self.arg_count(), self.arg(0)?) {
                    (2, SELECT_PALETTE) => Some(Color::Palette(PaletteColor(self.arg(1)?))),
                    (4, SELECT_RGB) => Some(Color::Rgb(RgbColor::new(
                        self.arg(1)?,
                        self.arg(2)?,
                        self.arg(3)?,
                    ))),
                    _ => None,
                };
            }
            _ => (),
        }

        let value = code as u8;
        let index = match value {
            30..=37 => value - 30,
            40..=47 => value - 40,
            90..=97 => value - 90 + 8,
            100..=107 => value - 100 + 8,
            _ => return None,
        };

        BasicColor::try_from(index).ok().map(Color::Basic)
    }

    /// Write the parameters without the leading `CSI` and trailing `m`.
    ///
    /// The code is followed by each argument, separated by semicolons.
    pub fn write_param(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <_ as fmt::Display>::fmt(&self.code_value(), f)?;
        for arg in self.args() {
            f.write_str(";")?;
            <_ as fmt::Display>::fmt(&arg, f)?;
        }
        Ok(())
    }

    /// Append the parameters to the given buffer.
    pub fn render_param(&self, out: &mut Vec<u8>) {
        push_decimal(out, self.code_value());
        for arg in self.args() {
            out.push(b';');
            push_decimal(out, arg);
        }
    }
}

/// Append the decimal digits of the value, without leading zeros.
pub(crate) fn push_decimal(out: &mut Vec<u8>, value: u8) {
    if 100 <= value {
        out.push(b'0' + value / 100);
    }
    if 10 <= value {
        out.push(b'0' + value / 10 % 10);
    }
    out.push(b'0' + value % 10);
}

impl From<CommandCode> for Command {
    fn from(value: CommandCode) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Command {
    /// Write the command as a complete escape sequence.
    ///
    /// No-op commands write nothing at all.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return Ok(());
        }

        f.write_str("\x1b[")?;
        self.write_param(f)?;
        f.write_str("m")
    }
}

impl fmt::Debug for Command {
    /// Write the command's name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return Ok(());
        } else if !self.is_valid() {
            return write!(f, "<!0x{:08x}>", self.0);
        }

        match self.code() {
            Some(code) if code.is_generic_color() => {
                f.write_str(code.name())?;
                f.write_str("(")?;
                let mut args = self.args();
                if args.next().is_some() {
                    f.write_str("#")?;
                    for arg in args {
                        write!(f, "{:02x}", arg)?;
                    }
                }
                f.write_str(")")
            }
            Some(code) => f.write_str(code.name()),
            None => write!(f, "<!{}>", self.code_value()),
        }
    }
}

// ----------------------------------------------------------------------------------------------------------
