//! # Pretty 🌸 SGR
//!
//! \[  [**Docs.rs**](https://docs.rs/prettysgr/latest/prettysgr/)
//! | [**Rust Crate**](https://crates.io/crates/prettysgr)
//! | [**Repository**](https://github.com/apparebit/prettypretty)
//! \]
//!
//! This crate **styles terminal output with ANSI SGR escape sequences**, while
//! writing as few escape sequences as possible. Its main abstraction is the
//! [`Writer`], which wraps any [`Write`](std::io::Write) sink:
//!
//!   * Set the desired background, foreground, and underline colors as well
//!     as the desired text modes. Doing so writes nothing.
//!   * Optionally push and later pop colors and modes, or use the scope
//!     guards returned by the `scoped_*` methods.
//!   * Write text. Before the text, the writer writes the one escape sequence
//!     that changes the terminal from the style it last wrote to the desired
//!     style. If nothing changed, it writes no escape sequence at all.
//!
//! Underneath, the crate provides the building blocks for computing escape
//! sequences without a writer:
//!
//!   * [`Color`] unifies the default color, the 16 [`BasicColor`]s, the 256
//!     [`PaletteColor`]s, and 24-bit [`RgbColor`]s.
//!   * [`Command`] is a single SGR command packed into 64 bits.
//!   * [`Sequence`] renders a list of commands as one escape sequence.
//!   * [`ModeSet`] is a set of [`Mode`]s and [`ModeSetDiff`] computes the
//!     commands for changing from one mode set to another, correctly handling
//!     mutually exclusive modes such as bold and faint.
//!
//!
//! # Example
//!
//! ```
//! # use std::io::Write;
//! # use prettysgr::{BasicColor, Mode, ModeAction, Writer};
//! let mut writer = Writer::new(Vec::new());
//!
//! writer.set_foreground_color(BasicColor::BrightBlack);
//! write!(writer, "12:00")?;
//! writer.set_foreground_color(BasicColor::Cyan);
//! writer.set_modes(Mode::Bold.into(), ModeAction::Add);
//! write!(writer, " INF ")?;
//! writer.reset();
//! write!(writer, "ready")?;
//!
//! assert_eq!(
//!     writer.get_ref(),
//!     b"\x1b[90m12:00\x1b[36;1m INF \x1b[0mready"
//! );
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//!
//! # Optional Features
//!
//! With the `serde` feature, colors, modes, and mode sets implement serde's
//! `Serialize` and `Deserialize` through their textual forms.
//!
//!
//! # Logging
//!
//! Writers log through the [`log`](https://crates.io/crates/log) facade. By
//! default, they are silent. With [`opt::Volume::Regular`], they log failed
//! writes at debug level. With [`opt::Volume::Detailed`], they also log every
//! escape sequence at trace level.

mod cmd;
mod color;
mod diff;
pub mod err;
mod mode;
pub mod opt;
mod seq;
#[cfg(feature = "serde")]
mod serde;
pub mod util;
mod writer;

pub use cmd::{Command, CommandCode};
pub use color::{BasicColor, Brightness, Color, DefaultColor, PaletteColor, RgbColor};
pub use diff::ModeSetDiff;
pub use mode::{Mode, ModeAction, ModeIter, ModeSet};
pub use seq::Sequence;
pub use writer::{Channel, Scope, State, Writer};
