//! The lazy, diff-based style writer.
//!
//! A [`Writer`] wraps a byte sink and tracks two [`State`]s: the *desired*
//! state, which changes synchronously with every style-setting call, and the
//! *committed* state, which reflects what has been written to the sink. Only
//! when text is written or the writer is flushed does it compute the
//! difference between the two states, render it as a single escape sequence,
//! and write that sequence ahead of the text.
//!
//! Each color channel and the modes also have a stack, so that nested
//! components can temporarily change styles and then restore the previous
//! ones. The `scoped_*` methods return a [`Scope`] guard that pops the stack
//! when dropped.
//!
//! ```
//! # use std::io::Write;
//! # use prettysgr::{BasicColor, Mode, ModeAction, Writer};
//! let mut writer = Writer::new(Vec::new());
//! writer.set_foreground_color(BasicColor::Blue);
//! write!(writer, "a")?;
//! {
//!     let mut scope = writer.scoped_modes(Mode::Bold.into(), ModeAction::Add);
//!     write!(scope, "b")?;
//! }
//! write!(writer, "c")?;
//! writer.reset();
//! writer.flush()?;
//!
//! assert_eq!(writer.get_ref(), b"\x1b[34ma\x1b[1mb\x1b[22mc\x1b[0m");
//! # Ok::<(), std::io::Error>(())
//! ```

use core::fmt;
use core::ops::{Deref, DerefMut};
use std::io::{self, Write};

use crate::cmd::Command;
use crate::color::Color;
use crate::diff::ModeSetDiff;
use crate::mode::{ModeAction, ModeSet};
use crate::opt::{Options, Volume};
use crate::seq::Sequence;
use crate::util::Nicely;

/// A channel of the style state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Background,
    Foreground,
    Underline,
    Modes,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Self::Background => "background color",
            Self::Foreground => "foreground color",
            Self::Underline => "underline color",
            Self::Modes => "modes",
        })
    }
}

// ----------------------------------------------------------------------------------------------------------

/// A style state.
///
/// Note that [`State::default`] leaves all colors unset, whereas
/// [`State::DEFAULT`] has all colors set to the terminal's default color.
/// Both normalize to the same state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct State {
    pub background: Color,
    pub foreground: Color,
    pub underline: Color,
    pub modes: ModeSet,
}

impl State {
    /// The terminal's default state.
    pub const DEFAULT: State = State {
        background: Color::Default,
        foreground: Color::Default,
        underline: Color::Default,
        modes: ModeSet::EMPTY,
    };

    /// Get this state with unset colors replaced by the default color.
    #[must_use = "the only reason to invoke method is to access the returned value"]
    pub const fn normalized(&self) -> Self {
        Self {
            background: self.background.or_default(),
            foreground: self.foreground.or_default(),
            underline: self.underline.or_default(),
            modes: self.modes,
        }
    }

    /// Append the commands for transitioning from this to the target state.
    ///
    /// If the target is the default state, the only command is `ResetAll`.
    /// Otherwise, commands for changed channels are appended in the order
    /// background, foreground, underline, and modes. Both states should be
    /// normalized.
    pub fn diff_into(&self, target: &State, out: &mut Sequence) {
        if self == target {
            return;
        } else if *target == Self::DEFAULT {
            out.push(Command::RESET_ALL);
            return;
        }

        if self.background != target.background {
            out.push(Command::set_background_color(target.background));
        }
        if self.foreground != target.foreground {
            out.push(Command::set_foreground_color(target.foreground));
        }
        if self.underline != target.underline {
            out.push(Command::set_underline_color(target.underline));
        }
        ModeSetDiff::new(self.modes, target.modes).write_commands(out);
    }
}

// ----------------------------------------------------------------------------------------------------------

/// A writer that prefixes written text with the escape sequence for the
/// desired style.
///
/// A writer is not reentrant. It should be driven from one logical stream of
/// output.
#[derive(Debug)]
pub struct Writer<W: Write> {
    sink: W,
    desired: State,
    committed: State,
    backgrounds: Vec<Color>,
    foregrounds: Vec<Color>,
    underlines: Vec<Color>,
    modes: Vec<ModeSet>,
    commands: Sequence,
    buffer: Vec<u8>,
    volume: Volume,
}

macro_rules! color_channel {
    ($set:ident, $push:ident, $pop:ident, $scoped:ident, $field:ident, $stack:ident, $channel:ident) => {
        #[doc = concat!("Set the desired ", stringify!($field), " color.")]
        pub fn $set<C: Into<Color>>(&mut self, color: C) {
            self.desired.$field = color.into();
        }

        #[doc = concat!("Save the desired ", stringify!($field), " color and then set it.")]
        pub fn $push<C: Into<Color>>(&mut self, color: C) {
            self.$stack.push(self.desired.$field);
            self.$set(color);
        }

        #[doc = concat!("Restore the most recently saved ", stringify!($field), " color.")]
        ///
        /// # Panics
        ///
        /// If there is no saved color.
        pub fn $pop(&mut self) {
            self.desired.$field = pop(&mut self.$stack, Channel::$channel);
        }

        #[doc = concat!("Push the ", stringify!($field), " color until the returned scope is dropped.")]
        pub fn $scoped<C: Into<Color>>(&mut self, color: C) -> Scope<'_, W> {
            self.$push(color);
            Scope {
                writer: self,
                channel: Channel::$channel,
            }
        }
    };
}

fn pop<T>(stack: &mut Vec<T>, channel: Channel) -> T {
    let Some(value) = stack.pop() else {
        panic!("unbalanced pop of {}", channel);
    };
    value
}

impl<W: Write> Writer<W> {
    /// Create a new writer with the default options.
    pub fn new(sink: W) -> Self {
        Self::with_options(sink, &Options::default())
    }

    /// Create a new writer with the given options.
    pub fn with_options(sink: W, options: &Options) -> Self {
        let stack_capacity = options.stack_capacity();

        Self {
            sink,
            desired: State::DEFAULT,
            committed: State::DEFAULT,
            backgrounds: Vec::with_capacity(stack_capacity),
            foregrounds: Vec::with_capacity(stack_capacity),
            underlines: Vec::with_capacity(stack_capacity),
            modes: Vec::with_capacity(stack_capacity),
            commands: Sequence::with_capacity(options.command_capacity()),
            buffer: Vec::with_capacity(options.buffer_capacity()),
            volume: options.volume(),
        }
    }

    color_channel!(
        set_background_color,
        push_background_color,
        pop_background_color,
        scoped_background_color,
        background,
        backgrounds,
        Background
    );

    color_channel!(
        set_foreground_color,
        push_foreground_color,
        pop_foreground_color,
        scoped_foreground_color,
        foreground,
        foregrounds,
        Foreground
    );

    color_channel!(
        set_underline_color,
        push_underline_color,
        pop_underline_color,
        scoped_underline_color,
        underline,
        underlines,
        Underline
    );

    /// Combine the desired modes with the given modes.
    pub fn set_modes(&mut self, modes: ModeSet, action: ModeAction) {
        self.desired.modes = self.desired.modes.with_other(modes, action);
    }

    /// Save the desired modes and then combine them with the given modes.
    pub fn push_modes(&mut self, modes: ModeSet, action: ModeAction) {
        self.modes.push(self.desired.modes);
        self.set_modes(modes, action);
    }

    /// Restore the most recently saved modes.
    ///
    /// # Panics
    ///
    /// If there are no saved modes.
    pub fn pop_modes(&mut self) {
        self.desired.modes = pop(&mut self.modes, Channel::Modes);
    }

    /// Push the modes until the returned scope is dropped.
    pub fn scoped_modes(&mut self, modes: ModeSet, action: ModeAction) -> Scope<'_, W> {
        self.push_modes(modes, action);
        Scope {
            writer: self,
            channel: Channel::Modes,
        }
    }

    /// Set the desired state to the terminal's default state.
    ///
    /// This method leaves the stacks untouched.
    pub fn reset(&mut self) {
        self.desired = State::DEFAULT;
    }

    /// Get the desired state.
    pub fn desired(&self) -> &State {
        &self.desired
    }

    /// Get the state last written to the sink.
    pub fn committed(&self) -> &State {
        &self.committed
    }

    /// Get the number of saved values for the channel.
    pub fn depth(&self, channel: Channel) -> usize {
        match channel {
            Channel::Background => self.backgrounds.len(),
            Channel::Foreground => self.foregrounds.len(),
            Channel::Underline => self.underlines.len(),
            Channel::Modes => self.modes.len(),
        }
    }

    /// Write the escape sequence for reaching the desired state.
    ///
    /// If the desired state, with unset colors treated as default, already
    /// is the committed state, this method writes nothing. Otherwise, it
    /// writes one escape sequence and, only if that succeeds, updates the
    /// committed state. After a failed write, the next call tries again.
    ///
    /// Unlike [`Write::flush`], this method does not flush the sink.
    pub fn sync(&mut self) -> io::Result<()> {
        let target = self.desired.normalized();
        if target == self.committed {
            return Ok(());
        }

        self.commands.clear();
        self.committed.diff_into(&target, &mut self.commands);
        self.buffer.clear();
        self.commands.render(&mut self.buffer);

        if let Err(err) = self.sink.write_all(&self.buffer) {
            if Volume::Regular <= self.volume {
                log::debug!("failed to write {}: {}", Nicely(&self.buffer), err);
            }
            return Err(err);
        }

        if Volume::Detailed <= self.volume {
            log::trace!("wrote {} for {:?}", Nicely(&self.buffer), self.commands);
        }
        self.committed = target;
        Ok(())
    }

    /// Get a reference to the sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Get a mutable reference to the sink.
    ///
    /// Writing escape sequences directly to the sink invalidates the
    /// committed state.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Consume this writer and return the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> Write for Writer<W> {
    /// Synchronize the style and then write the text to the sink.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sync()?;
        self.sink.write(buf)
    }

    /// Synchronize the style and then flush the sink.
    fn flush(&mut self) -> io::Result<()> {
        self.sync()?;
        self.sink.flush()
    }
}

// ----------------------------------------------------------------------------------------------------------

/// A guard that pops one of a writer's stacks when dropped.
///
/// The guard dereferences to the writer.
pub struct Scope<'a, W: Write> {
    writer: &'a mut Writer<W>,
    channel: Channel,
}

impl<W: Write> Scope<'_, W> {
    /// Get the channel popped by this scope.
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

impl<W: Write> Deref for Scope<'_, W> {
    type Target = Writer<W>;

    fn deref(&self) -> &Self::Target {
        &*self.writer
    }
}

impl<W: Write> DerefMut for Scope<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.writer
    }
}

impl<W: Write> Write for Scope<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write> Drop for Scope<'_, W> {
    fn drop(&mut self) {
        match self.channel {
            Channel::Background => self.writer.pop_background_color(),
            Channel::Foreground => self.writer.pop_foreground_color(),
            Channel::Underline => self.writer.pop_underline_color(),
            Channel::Modes => self.writer.pop_modes(),
        }
    }
}

impl<W: Write> fmt::Debug for Scope<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("channel", &self.channel)
            .field("desired", &self.writer.desired)
            .finish_non_exhaustive()
    }
}

// ----------------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::color::{BasicColor, PaletteColor, RgbColor};
    use crate::mode::Mode;

    fn output(writer: &Writer<Vec<u8>>) -> &str {
        core::str::from_utf8(writer.get_ref()).unwrap()
    }

    #[test]
    fn test_state() {
        assert_eq!(State::default().normalized(), State::DEFAULT);
        assert_ne!(State::default(), State::DEFAULT);

        let mut seq = Sequence::new();
        State::DEFAULT.diff_into(&State::DEFAULT, &mut seq);
        assert!(seq.is_empty());

        let styled = State {
            foreground: BasicColor::Red.into(),
            ..State::DEFAULT
        };
        styled.diff_into(&State::DEFAULT, &mut seq);
        assert_eq!(seq.as_slice(), &[Command::RESET_ALL]);
    }

    #[test]
    fn test_first_write() -> io::Result<()> {
        let mut writer = Writer::new(Vec::new());
        writer.set_background_color(BasicColor::BrightBlack);
        writer.set_foreground_color(BasicColor::Cyan);
        writer.set_modes(Mode::Italic.into(), ModeAction::Add);
        write!(writer, "x")?;
        writer.flush()?;
        assert_eq!(output(&writer), "\x1b[100;36;3mx");

        writer.set_background_color(Color::Default);
        writer.set_foreground_color(PaletteColor(12));
        write!(writer, "y")?;
        assert_eq!(output(&writer), "\x1b[100;36;3mx\x1b[49;38;5;12my");
        Ok(())
    }

    #[test]
    fn test_nothing_to_do() -> io::Result<()> {
        let mut writer = Writer::new(Vec::new());
        writer.flush()?;
        write!(writer, "plain")?;
        assert_eq!(output(&writer), "plain");

        // Unset colors behave like the default color.
        writer.set_foreground_color(Color::Unset);
        writer.set_underline_color(Color::Default);
        write!(writer, "!")?;
        assert_eq!(output(&writer), "plain!");
        assert_eq!(writer.desired().foreground, Color::Unset);
        Ok(())
    }

    #[test]
    fn test_bold_to_faint() -> io::Result<()> {
        let mut writer = Writer::new(Vec::new());
        writer.set_modes(Mode::Bold.into(), ModeAction::Replace);
        writer.sync()?;
        writer.set_modes(Mode::Faint.into(), ModeAction::Replace);
        writer.sync()?;
        assert_eq!(output(&writer), "\x1b[1m\x1b[22;2m");
        Ok(())
    }

    #[test]
    fn test_push_pop() -> io::Result<()> {
        let mut writer = Writer::new(Vec::new());
        writer.set_foreground_color(RgbColor::new(1, 2, 3));
        writer.push_foreground_color(BasicColor::Green);
        assert_eq!(writer.depth(Channel::Foreground), 1);
        assert_eq!(writer.desired().foreground, BasicColor::Green.into());

        writer.pop_foreground_color();
        assert_eq!(writer.depth(Channel::Foreground), 0);
        assert_eq!(writer.desired().foreground, RgbColor::new(1, 2, 3).into());

        writer.flush()?;
        assert_eq!(output(&writer), "\x1b[38;2;1;2;3m");

        writer.push_modes(Mode::Overlined | Mode::Bold, ModeAction::Add);
        writer.push_modes(Mode::Bold.into(), ModeAction::Remove);
        assert_eq!(writer.desired().modes, ModeSet::from(Mode::Overlined));
        writer.pop_modes();
        assert_eq!(writer.desired().modes, Mode::Overlined | Mode::Bold);
        writer.pop_modes();
        assert!(writer.desired().modes.is_empty());
        assert_eq!(writer.depth(Channel::Modes), 0);
        Ok(())
    }

    #[test]
    #[should_panic(expected = "unbalanced pop of underline color")]
    fn test_unbalanced_pop() {
        let mut writer = Writer::new(Vec::new());
        writer.pop_underline_color();
    }

    #[test]
    fn test_scopes() -> io::Result<()> {
        let mut writer = Writer::new(Vec::new());
        {
            let mut scope = writer.scoped_background_color(PaletteColor(17));
            assert_eq!(scope.channel(), Channel::Background);
            assert_eq!(scope.depth(Channel::Background), 1);
            {
                let mut inner = scope.scoped_underline_color(BasicColor::Red);
                write!(inner, "a")?;
            }
            write!(scope, "b")?;
        }
        assert_eq!(writer.depth(Channel::Background), 0);
        assert_eq!(writer.depth(Channel::Underline), 0);
        write!(writer, "c")?;

        assert_eq!(output(&writer), "\x1b[48;5;17;58;5;1ma\x1b[59mb\x1b[0mc");
        Ok(())
    }

    #[test]
    fn test_into_inner() -> io::Result<()> {
        let mut writer = Writer::with_options(Vec::new(), &Options::with_detailed_log());
        writer.set_modes(Mode::Superscript.into(), ModeAction::Toggle);
        write!(writer, "2")?;
        writer.get_mut().push(b'!');
        assert_eq!(writer.into_inner(), b"\x1b[73m2!");
        Ok(())
    }
}
