//! Channel selectors and slot assignments.

use rgb::RGBA8;

use crate::PixelFormat;

/// One sample of an RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    /// All channels in packing order.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Read this channel's sample from a pixel.
    #[inline]
    pub fn sample(self, pixel: RGBA8) -> u8 {
        match self {
            Channel::Red => pixel.r,
            Channel::Green => pixel.g,
            Channel::Blue => pixel.b,
            Channel::Alpha => pixel.a,
        }
    }

    /// Write this channel's sample into a pixel.
    #[inline]
    pub fn set(self, pixel: &mut RGBA8, value: u8) {
        match self {
            Channel::Red => pixel.r = value,
            Channel::Green => pixel.g = value,
            Channel::Blue => pixel.b = value,
            Channel::Alpha => pixel.a = value,
        }
    }

    /// Channel occupying output slot `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Ordered mapping from slot index to the channel selected for that slot.
///
/// For a split, output image `i` is built from `selector(i)` of the source.
/// For a merge, output channel `i` is read from `selector(i)` of input image `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelAssignment {
    selectors: Vec<Channel>,
}

impl ChannelAssignment {
    /// Create an assignment from explicit selectors.
    pub fn new(selectors: Vec<Channel>) -> Self {
        Self { selectors }
    }

    /// Split every meaningful channel of `format`, in R, G, B, A order.
    pub fn split_for(format: PixelFormat) -> Self {
        Self::new(Channel::ALL[..format.channel_count()].to_vec())
    }

    /// Merge three grayscale images into R, G and B.
    pub fn merge_rgb() -> Self {
        Self::new(vec![Channel::Red, Channel::Green, Channel::Blue])
    }

    /// Merge four images into RGBA, taking alpha from the fourth image's red sample.
    pub fn merge_rgba() -> Self {
        Self::new(vec![Channel::Red, Channel::Green, Channel::Blue, Channel::Red])
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Whether there are no slots.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Selector for a slot.
    pub fn selector(&self, slot: usize) -> Option<Channel> {
        self.selectors.get(slot).copied()
    }

    /// Iterate over selectors in slot order.
    pub fn iter(&self) -> impl Iterator<Item = Channel> + '_ {
        self.selectors.iter().copied()
    }
}
