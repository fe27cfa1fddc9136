//! Computing the commands for changing text modes.
//!
//! Independent modes such as italic are straightforward: A changed mode
//! results in either its set or its reset command. Exclusive pairs such as
//! bold and faint are more involved, since SGR only has one command for
//! resetting both modes of a pair. Switching from bold to faint hence
//! requires resetting both modes before setting faint.
//!
//! For each pair, the two bits of a mode set form a sub-state, with 0 for
//! neither mode, 1 for the first mode, 2 for the second mode, and 3 for both
//! modes. A constant 4×4 table maps each transition between sub-states to the
//! subset of reset, set-first, and set-second commands to emit, in that order.
//!
//! ```
//! # use prettysgr::{Mode, ModeSet, ModeSetDiff};
//! let diff = ModeSetDiff::new(ModeSet::from(Mode::Bold), ModeSet::from(Mode::Faint));
//! assert_eq!(diff.commands().to_string(), "\x1b[22;2m");
//! ```

use crate::cmd::Command;
use crate::mode::{Mode, ModeSet};
use crate::seq::Sequence;

/// The modes without an exclusive counterpart, in diff order.
const INDEPENDENT: [Mode; 5] = [
    Mode::Italic,
    Mode::Reversed,
    Mode::Concealed,
    Mode::CrossedOut,
    Mode::Overlined,
];

/// A pair of mutually exclusive modes occupying adjacent bits.
struct ExclusivePair {
    first: Mode,
    reset: Command,
    set_first: Command,
    set_second: Command,
}

impl ExclusivePair {
    const fn new(first: Mode, second: Mode) -> Self {
        Self {
            first,
            reset: first.reset_command(),
            set_first: first.set_command(),
            set_second: second.set_command(),
        }
    }

    #[inline]
    const fn shift(&self) -> u16 {
        self.first as u16
    }

    #[inline]
    const fn mask(&self) -> u16 {
        0b11 << self.shift()
    }

    #[inline]
    const fn substate(&self, set: ModeSet) -> usize {
        ((set.bits() & self.mask()) >> self.shift()) as usize
    }
}

/// The exclusive pairs in diff order.
const EXCLUSIVE: [ExclusivePair; 5] = [
    ExclusivePair::new(Mode::Bold, Mode::Faint),
    ExclusivePair::new(Mode::SlowBlink, Mode::RapidBlink),
    ExclusivePair::new(Mode::Framed, Mode::Encircled),
    ExclusivePair::new(Mode::Superscript, Mode::Subscript),
    ExclusivePair::new(Mode::Underlined, Mode::DoublyUnderlined),
];

const RESET: u8 = 0b100;
const SET_FIRST: u8 = 0b010;
const SET_SECOND: u8 = 0b001;

/// The commands to emit, indexed by old and new sub-state.
const TRANSITIONS: [[u8; 4]; 4] = [
    [0, SET_FIRST, SET_SECOND, SET_FIRST | SET_SECOND],
    [RESET, 0, RESET | SET_SECOND, SET_SECOND],
    [RESET, RESET | SET_FIRST, 0, SET_FIRST],
    [RESET, RESET | SET_FIRST, RESET | SET_SECOND, 0],
];

// ----------------------------------------------------------------------------------------------------------

/// The difference between an old and a new mode set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModeSetDiff {
    old: ModeSet,
    new: ModeSet,
}

impl ModeSetDiff {
    /// Create a new diff.
    pub const fn new(old: ModeSet, new: ModeSet) -> Self {
        Self { old, new }
    }

    /// Get the old mode set.
    pub const fn old(&self) -> ModeSet {
        self.old
    }

    /// Get the new mode set.
    pub const fn new_set(&self) -> ModeSet {
        self.new
    }

    /// Get the modes in the new but not the old set.
    pub const fn added(&self) -> ModeSet {
        ModeSet::from_bits(self.new.bits() & !self.old.bits())
    }

    /// Get the modes in the old but not the new set.
    pub const fn removed(&self) -> ModeSet {
        ModeSet::from_bits(self.old.bits() & !self.new.bits())
    }

    /// Get the modes in exactly one of the two sets.
    pub const fn changed(&self) -> ModeSet {
        ModeSet::from_bits(self.old.bits() ^ self.new.bits())
    }

    /// Get the diff from the new to the old set.
    #[must_use = "the only reason to invoke method is to access the returned value"]
    pub const fn reversed(&self) -> Self {
        Self {
            old: self.new,
            new: self.old,
        }
    }

    /// Determine whether the two sets are the same.
    pub const fn is_empty(&self) -> bool {
        self.old.bits() == self.new.bits()
    }

    /// Append the commands for transitioning from the old to the new set.
    ///
    /// Commands for independent modes come first, followed by commands for
    /// exclusive pairs. Only modes that actually changed result in commands.
    pub fn write_commands(&self, out: &mut Sequence) {
        let changed = self.changed();
        if changed.is_empty() {
            return;
        }

        for mode in INDEPENDENT {
            if changed.has(mode) {
                out.push(if self.new.has(mode) {
                    mode.set_command()
                } else {
                    mode.reset_command()
                });
            }
        }

        for pair in &EXCLUSIVE {
            if changed.bits() & pair.mask() == 0 {
                continue;
            }

            let emit = TRANSITIONS[pair.substate(self.old)][pair.substate(self.new)];
            if emit & RESET != 0 {
                out.push(pair.reset);
            }
            if emit & SET_FIRST != 0 {
                out.push(pair.set_first);
            }
            if emit & SET_SECOND != 0 {
                out.push(pair.set_second);
            }
        }
    }

    /// Get the commands for transitioning from the old to the new set.
    pub fn commands(&self) -> Sequence {
        let mut out = Sequence::new();
        self.write_commands(&mut out);
        out
    }
}

// ----------------------------------------------------------------------------------------------------------
