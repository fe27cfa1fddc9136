//! Sequences of SGR commands rendered as one escape sequence.

use core::fmt;

use crate::cmd::Command;

/// An ordered list of commands.
///
/// A sequence renders as a single escape sequence, i.e., `ESC [`, followed by
/// the parameters of all valid commands separated by semicolons, followed by
/// `m`. No-op commands are skipped together with their separator, so that a
/// sequence without valid commands renders as `ESC [ m`.
///
/// ```
/// # use prettysgr::{BasicColor, Command, Sequence};
/// let seq: Sequence = [
///     Command::set_background_color(BasicColor::BrightBlack),
///     Command::ZERO,
///     Command::set_foreground_color(BasicColor::Cyan),
///     Command::SET_ITALIC,
/// ].into_iter().collect();
///
/// assert_eq!(seq.to_bytes(), b"\x1b[100;36;3m");
/// assert_eq!(Sequence::new().to_string(), "\x1b[m");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Sequence {
    commands: Vec<Command>,
}

impl Sequence {
    /// Create a new empty sequence.
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Create a new empty sequence with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Append a command.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Remove all commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Get the number of commands, including no-ops.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Determine whether this sequence has no commands at all.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Determine whether this sequence has no valid commands.
    pub fn is_noop(&self) -> bool {
        self.commands.iter().all(|command| !command.is_valid())
    }

    /// Get an iterator over the commands.
    pub fn iter(&self) -> core::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Get the commands as a slice.
    pub fn as_slice(&self) -> &[Command] {
        &self.commands
    }

    /// Append the rendered escape sequence to the buffer.
    pub fn render(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(b"\x1b[");

        let mut first = true;
        for command in self.commands.iter().filter(|command| command.is_valid()) {
            if !first {
                out.push(b';');
            }
            first = false;
            command.render_param(out);
        }

        out.push(b'm');
    }

    /// Render the escape sequence into a new buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + 4 * self.commands.len() + 1);
        self.render(&mut out);
        out
    }
}

impl From<Vec<Command>> for Sequence {
    fn from(value: Vec<Command>) -> Self {
        Self { commands: value }
    }
}

impl FromIterator<Command> for Sequence {
    fn from_iter<T: IntoIterator<Item = Command>>(iter: T) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl Extend<Command> for Sequence {
    fn extend<T: IntoIterator<Item = Command>>(&mut self, iter: T) {
        self.commands.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Command;
    type IntoIter = core::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\x1b[")?;

        let mut first = true;
        for command in self.commands.iter().filter(|command| command.is_valid()) {
            if !first {
                f.write_str(";")?;
            }
            first = false;
            command.write_param(f)?;
        }

        f.write_str("m")
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.commands.iter()).finish()
    }
}

// ----------------------------------------------------------------------------------------------------------
