//! Helper module with the options for style writers.
//!
//! This module provides the options for a [`Writer`](crate::Writer) and the
//! corresponding builder.
//!
//!
//! # Example
//!
//! ```
//! # use prettysgr::opt::{Options, Volume};
//! let options = Options::builder()
//!     .volume(Volume::Detailed)
//!     .stack_capacity(16)
//!     .build();
//!
//! assert_eq!(options.volume(), Volume::Detailed);
//! assert_eq!(options.stack_capacity(), 16);
//! assert_eq!(options.buffer_capacity(), 128);
//! ```

/// The diagnostic logging volume.
///
/// With regular volume, a writer logs failed writes to its sink. With
/// detailed volume, it also logs every escape sequence it emits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Volume {
    #[default]
    Silent,
    Regular,
    Detailed,
}

#[derive(Clone, Debug)]
struct OptionData {
    volume: Volume,
    stack_capacity: usize,
    command_capacity: usize,
    buffer_capacity: usize,
}

impl OptionData {
    pub const fn new() -> Self {
        Self {
            volume: Volume::Silent,
            stack_capacity: 8,
            command_capacity: 8,
            buffer_capacity: 128,
        }
    }
}

/// A builder of options objects.
#[derive(Debug)]
pub struct OptionBuilder(OptionData);

impl OptionBuilder {
    /// Set the volume.
    pub fn volume(&mut self, volume: Volume) -> &mut Self {
        self.0.volume = volume;
        self
    }

    /// Set the initial capacity of each push/pop stack.
    pub fn stack_capacity(&mut self, capacity: usize) -> &mut Self {
        self.0.stack_capacity = capacity;
        self
    }

    /// Set the initial capacity of the scratch command sequence.
    ///
    /// A full reconciliation without modes needs three commands, one per
    /// color channel. Each changed mode pair adds up to two more.
    pub fn command_capacity(&mut self, capacity: usize) -> &mut Self {
        self.0.command_capacity = capacity;
        self
    }

    /// Set the initial capacity of the scratch byte buffer.
    pub fn buffer_capacity(&mut self, capacity: usize) -> &mut Self {
        self.0.buffer_capacity = capacity;
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> Options {
        Options(self.0.clone())
    }
}

/// An options object.
#[derive(Clone, Debug)]
pub struct Options(OptionData);

impl Default for Options {
    fn default() -> Self {
        Options(OptionData::new())
    }
}

impl Options {
    /// Create a new builder with the default option values.
    pub fn builder() -> OptionBuilder {
        OptionBuilder(OptionData::new())
    }

    /// Instantiate the default options but with regular logging enabled.
    pub fn with_log() -> Options {
        Self::builder().volume(Volume::Regular).build()
    }

    /// Instantiate the default options but with detailed logging enabled.
    pub fn with_detailed_log() -> Options {
        Self::builder().volume(Volume::Detailed).build()
    }

    /// Get the volume.
    pub fn volume(&self) -> Volume {
        self.0.volume
    }

    /// Get the initial capacity of each push/pop stack.
    pub fn stack_capacity(&self) -> usize {
        self.0.stack_capacity
    }

    /// Get the initial capacity of the scratch command sequence.
    pub fn command_capacity(&self) -> usize {
        self.0.command_capacity
    }

    /// Get the initial capacity of the scratch byte buffer.
    pub fn buffer_capacity(&self) -> usize {
        self.0.buffer_capacity
    }
}
