//! Text modes and sets thereof.
//!
//! A [`Mode`] is a boolean text attribute such as bold or italic. A
//! [`ModeSet`] is a 16-bit set of modes. It captures which modes are in
//! effect and, as such, is a *state*. The instructions for transitioning
//! between two states are computed by a
//! [`ModeSetDiff`](crate::ModeSetDiff).
//!
//! Several modes come in mutually exclusive pairs, e.g., bold and faint. The
//! terminal cannot show both at the same time and has only one code for
//! resetting both. A mode set does not prevent both modes of a pair from being
//! set; the diff resolves that case.

use core::fmt;
use core::iter::FusedIterator;
use core::ops::{BitOr, BitOrAssign};
use core::str::FromStr;

use crate::cmd::Command;
use crate::err::Error;

/// A boolean text mode.
///
/// The discriminant is the mode's bit position in a [`ModeSet`].
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Mode {
    Bold = 0,
    Faint = 1,
    Italic = 2,
    SlowBlink = 3,
    RapidBlink = 4,
    Reversed = 5,
    Concealed = 6,
    CrossedOut = 7,
    Underlined = 8,
    DoublyUnderlined = 9,
    Framed = 10,
    Encircled = 11,
    Overlined = 12,
    Superscript = 13,
    Subscript = 14,
}

impl Mode {
    /// Get an iterator over all modes in bit order.
    pub fn all() -> ModeIter {
        ModeSet::ALL.modes()
    }

    /// Get this mode's bit in a mode set.
    #[inline]
    pub const fn bit(&self) -> u16 {
        1 << *self as u8
    }

    /// Get this mode's name.
    pub const fn name(&self) -> &'static str {
        use self::Mode::*;

        match *self {
            Bold => "Bold",
            Faint => "Faint",
            Italic => "Italic",
            SlowBlink => "SlowBlink",
            RapidBlink => "RapidBlink",
            Reversed => "Reversed",
            Concealed => "Concealed",
            CrossedOut => "CrossedOut",
            Underlined => "Underlined",
            DoublyUnderlined => "DoublyUnderlined",
            Framed => "Framed",
            Encircled => "Encircled",
            Overlined => "Overlined",
            Superscript => "Superscript",
            Subscript => "Subscript",
        }
    }

    /// Get the command that enables this mode.
    pub const fn set_command(&self) -> Command {
        use self::Mode::*;

        match *self {
            Bold => Command::SET_BOLD,
            Faint => Command::SET_FAINT,
            Italic => Command::SET_ITALIC,
            SlowBlink => Command::SET_SLOW_BLINK,
            RapidBlink => Command::SET_RAPID_BLINK,
            Reversed => Command::SET_REVERSED,
            Concealed => Command::SET_CONCEALED,
            CrossedOut => Command::SET_CROSSED_OUT,
            Underlined => Command::SET_UNDERLINED,
            DoublyUnderlined => Command::SET_DOUBLY_UNDERLINED,
            Framed => Command::SET_FRAMED,
            Encircled => Command::SET_ENCIRCLED,
            Overlined => Command::SET_OVERLINED,
            Superscript => Command::SET_SUPERSCRIPT,
            Subscript => Command::SET_SUBSCRIPT,
        }
    }

    /// Get the command that disables this mode.
    ///
    /// For a mode belonging to an exclusive pair, that command disables both
    /// modes of the pair.
    pub const fn reset_command(&self) -> Command {
        use self::Mode::*;

        match *self {
            Bold | Faint => Command::RESET_BOLD_AND_FAINT,
            Italic => Command::RESET_ITALIC,
            SlowBlink | RapidBlink => Command::RESET_ALL_BLINKS,
            Reversed => Command::RESET_REVERSED,
            Concealed => Command::RESET_CONCEALED,
            CrossedOut => Command::RESET_CROSSED_OUT,
            Underlined | DoublyUnderlined => Command::RESET_ALL_UNDERLINES,
            Framed | Encircled => Command::RESET_FRAMED_AND_ENCIRCLED,
            Overlined => Command::RESET_OVERLINED,
            Superscript | Subscript => Command::RESET_SUPERSCRIPT_AND_SUBSCRIPT,
        }
    }

    const fn from_index(index: u8) -> Option<Self> {
        use self::Mode::*;

        Some(match index {
            0 => Bold,
            1 => Faint,
            2 => Italic,
            3 => SlowBlink,
            4 => RapidBlink,
            5 => Reversed,
            6 => Concealed,
            7 => CrossedOut,
            8 => Underlined,
            9 => DoublyUnderlined,
            10 => Framed,
            11 => Encircled,
            12 => Overlined,
            13 => Superscript,
            14 => Subscript,
            _ => return None,
        })
    }
}

impl TryFrom<u8> for Mode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or(Error::InvalidModeValue(value))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidModeText(s.to_owned()))
    }
}

impl BitOr for Mode {
    type Output = ModeSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        ModeSet(self.bit() | rhs.bit())
    }
}

// ----------------------------------------------------------------------------------------------------------

/// The action for combining two mode sets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModeAction {
    /// Use the other set.
    #[default]
    Replace,
    /// Use the union of both sets.
    Add,
    /// Use this set without the other set.
    Remove,
    /// Use the symmetric difference of both sets.
    Toggle,
}

// ----------------------------------------------------------------------------------------------------------

/// A set of text modes.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<Mode>", into = "Vec<Mode>")
)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct ModeSet(u16);

impl ModeSet {
    /// The empty mode set.
    pub const EMPTY: ModeSet = ModeSet(0);

    /// The mode set with all modes.
    pub const ALL: ModeSet = ModeSet(0x7fff);

    /// Create a new empty mode set.
    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Create a new mode set from its bits, ignoring bits without a mode.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Get the bits.
    #[inline]
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Determine whether this set contains the mode.
    #[inline]
    pub const fn has(&self, mode: Mode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// Get this set with the mode added.
    #[must_use = "the only reason to invoke method is to access the returned value"]
    pub const fn with(&self, mode: Mode) -> Self {
        Self(self.0 | mode.bit())
    }

    /// Get this set with the mode removed.
    #[must_use = "the only reason to invoke method is to access the returned value"]
    pub const fn without(&self, mode: Mode) -> Self {
        Self(self.0 & !mode.bit())
    }

    /// Get this set with the mode toggled.
    #[must_use = "the only reason to invoke method is to access the returned value"]
    pub const fn with_toggled(&self, mode: Mode) -> Self {
        Self(self.0 ^ mode.bit())
    }

    /// Combine this set with the other set according to the action.
    #[must_use = "the only reason to invoke method is to access the returned value"]
    pub const fn with_other(&self, other: ModeSet, action: ModeAction) -> Self {
        match action {
            ModeAction::Replace => other,
            ModeAction::Add => Self(self.0 | other.0),
            ModeAction::Remove => Self(self.0 & !other.0),
            ModeAction::Toggle => Self(self.0 ^ other.0),
        }
    }

    /// Determine whether this set is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Get the number of modes in this set.
    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Get an iterator over the modes in this set, in bit order.
    #[inline]
    pub const fn modes(&self) -> ModeIter {
        ModeIter {
            set: *self,
            cursor: 0,
            remaining: self.len(),
        }
    }
}

impl From<Mode> for ModeSet {
    fn from(value: Mode) -> Self {
        Self(value.bit())
    }
}

impl FromIterator<Mode> for ModeSet {
    fn from_iter<T: IntoIterator<Item = Mode>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, mode| set.with(mode))
    }
}

impl BitOr<Mode> for ModeSet {
    type Output = ModeSet;

    fn bitor(self, rhs: Mode) -> Self::Output {
        self.with(rhs)
    }
}

impl BitOr for ModeSet {
    type Output = ModeSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign<Mode> for ModeSet {
    fn bitor_assign(&mut self, rhs: Mode) {
        self.0 |= rhs.bit();
    }
}

impl fmt::Debug for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.modes()).finish()
    }
}

// ----------------------------------------------------------------------------------------------------------

/// An iterator over the modes of a mode set.
#[derive(Debug)]
pub struct ModeIter {
    set: ModeSet,
    cursor: u8,
    remaining: usize,
}

impl Iterator for ModeIter {
    type Item = Mode;

    fn next(&mut self) -> Option<Self::Item> {
        while 0 < self.remaining {
            let mode = Mode::from_index(self.cursor)?;
            self.cursor += 1;

            if self.set.has(mode) {
                self.remaining -= 1;
                return Some(mode);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ModeIter {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl FusedIterator for ModeIter {}

// ----------------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mode() -> Result<(), Error> {
        assert_eq!(Mode::all().count(), 15);
        for (index, mode) in Mode::all().enumerate() {
            assert_eq!(mode as usize, index);
            assert_eq!(Mode::try_from(index as u8)?, mode);
            assert_eq!(mode.to_string().parse::<Mode>()?, mode);
        }

        assert_eq!(Mode::try_from(15), Err(Error::InvalidModeValue(15)));
        assert_eq!("crossedout".parse::<Mode>()?, Mode::CrossedOut);
        assert_eq!(
            "blink".parse::<Mode>(),
            Err(Error::InvalidModeText("blink".into()))
        );
        assert_eq!(Mode::Subscript.bit(), 0x4000);
        Ok(())
    }

    #[test]
    fn test_commands() {
        assert_eq!(Mode::Bold.set_command(), Command::SET_BOLD);
        assert_eq!(Mode::Faint.reset_command(), Command::RESET_BOLD_AND_FAINT);
        assert_eq!(Mode::Overlined.set_command().to_string(), "\x1b[53m");
        assert_eq!(Mode::Overlined.reset_command().to_string(), "\x1b[55m");
        assert_eq!(
            Mode::DoublyUnderlined.reset_command(),
            Command::RESET_ALL_UNDERLINES
        );
    }

    #[test]
    fn test_with_without_toggle() {
        let set = ModeSet::new().with(Mode::Bold).with(Mode::Italic);
        assert!(set.has(Mode::Bold));
        assert!(set.has(Mode::Italic));
        assert!(!set.has(Mode::Faint));
        assert_eq!(set.len(), 2);

        let set = set.without(Mode::Bold);
        assert!(!set.has(Mode::Bold));
        assert_eq!(set, ModeSet::from(Mode::Italic));

        let set = set.with_toggled(Mode::Faint).with_toggled(Mode::Italic);
        assert_eq!(set, ModeSet::from(Mode::Faint));
        assert_eq!(set.without(Mode::Faint), ModeSet::EMPTY);
        assert!(ModeSet::EMPTY.is_empty());
    }

    #[test]
    fn test_with_other() {
        let this = Mode::Bold | Mode::Italic;
        let other = Mode::Italic | Mode::Overlined;

        assert_eq!(this.with_other(other, ModeAction::Replace), other);
        assert_eq!(
            this.with_other(other, ModeAction::Add),
            Mode::Bold | Mode::Italic | Mode::Overlined
        );
        assert_eq!(
            this.with_other(other, ModeAction::Remove),
            ModeSet::from(Mode::Bold)
        );
        assert_eq!(
            this.with_other(other, ModeAction::Toggle),
            Mode::Bold | Mode::Overlined
        );
    }

    #[test]
    fn test_iter_and_debug() {
        let set: ModeSet = [Mode::Subscript, Mode::Bold, Mode::Framed].into_iter().collect();
        let mut modes = set.modes();
        assert_eq!(modes.len(), 3);
        assert_eq!(modes.next(), Some(Mode::Bold));
        assert_eq!(modes.len(), 2);
        assert_eq!(modes.next(), Some(Mode::Framed));
        assert_eq!(modes.next(), Some(Mode::Subscript));
        assert_eq!(modes.next(), None);
        assert_eq!(modes.next(), None);

        assert_eq!(format!("{:?}", set), "{Bold, Framed, Subscript}");
        assert_eq!(format!("{:?}", ModeSet::EMPTY), "{}");
        assert_eq!(ModeSet::from_bits(0xffff), ModeSet::ALL);
        assert_eq!(ModeSet::ALL.len(), 15);

        let mut set = ModeSet::new();
        set |= Mode::Reversed;
        assert_eq!(set.bits(), 0x20);
    }
}
