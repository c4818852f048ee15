//! Decides whether a pixel is close enough to the seed color to join the
//! fill, under a selectable channel metric.

use crate::color::{self, Rgba8};

/// The channel metric used to compare pixels against the seed color.
/// The ordering matches the tool's channel dropdown and the integer stored
/// in the preferences.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Channel {
    /// Composite of the visible colors, merged with the page background.
    Rgb,
    Red,
    Green,
    Blue,
    Hue,
    Saturation,
    Lightness,
    Alpha,
}

impl Channel {
    pub fn from_index(index: u64) -> Self {
        match index {
            1 => Self::Red,
            2 => Self::Green,
            3 => Self::Blue,
            4 => Self::Hue,
            5 => Self::Saturation,
            6 => Self::Lightness,
            7 => Self::Alpha,
            _ => Self::Rgb,
        }
    }

    /// Pre-scale a user threshold (0..=100) for this metric: byte-channel
    /// metrics compare in the 0..=255 range, HSL metrics in their natural
    /// 0..=1 range times 100.
    pub fn scale_threshold(self, threshold: u32) -> u32 {
        match self {
            Self::Rgb | Self::Red | Self::Green | Self::Blue | Self::Alpha => {
                255 * threshold / 100
            }
            Self::Hue | Self::Saturation | Self::Lightness => threshold,
        }
    }
}

/// The color sampled at a seed point, captured once and immutable thereafter.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Seed {
    /// The raw (premultiplied) pixel at the seed point.
    pub color: Rgba8,
    /// The seed pixel merged with the page background color.
    pub merged: Rgba8,
}

impl Seed {
    pub fn new(color: Rgba8, background: Rgba8) -> Self {
        Self {
            color,
            merged: color::compose_onto(color, background),
        }
    }
}

/// Compare a pixel with the seed color under the given metric. `threshold`
/// is expected to be pre-scaled with [`Channel::scale_threshold`].
pub fn compare(
    check: Rgba8,
    seed: &Seed,
    background: Rgba8,
    threshold: u32,
    channel: Channel,
) -> bool {
    let byte_diff = |a: u8, b: u8| (a as i32 - b as i32).unsigned_abs();
    let straight = |c: u8, a: u8| color::unpremultiply(c, a);

    match channel {
        Channel::Alpha => byte_diff(check.a, seed.color.a) <= threshold,
        Channel::Red => {
            byte_diff(straight(check.r, check.a), straight(seed.color.r, seed.color.a))
                <= threshold
        }
        Channel::Green => {
            byte_diff(straight(check.g, check.a), straight(seed.color.g, seed.color.a))
                <= threshold
        }
        Channel::Blue => {
            byte_diff(straight(check.b, check.a), straight(seed.color.b, seed.color.a))
                <= threshold
        }
        Channel::Rgb => {
            // Merge both pixels with the background first, so transparency
            // doesn't make unrelated colors look alike.
            let merged = color::compose_onto(check, background);
            let diff = byte_diff(merged.r, seed.merged.r)
                + byte_diff(merged.g, seed.merged.g)
                + byte_diff(merged.b, seed.merged.b);

            diff / 3 <= threshold * 3 / 4
        }
        Channel::Hue | Channel::Saturation | Channel::Lightness => {
            let hsl = |px: Rgba8| {
                color::rgb_to_hsl(
                    straight(px.r, px.a) as f32 / 255.0,
                    straight(px.g, px.a) as f32 / 255.0,
                    straight(px.b, px.a) as f32 / 255.0,
                )
            };
            let a = hsl(check);
            let b = hsl(seed.color);
            let i = match channel {
                Channel::Hue => 0,
                Channel::Saturation => 1,
                _ => 2,
            };

            ((a[i] - b[i]).abs() * 100.0) as u32 <= threshold
        }
    }
}

/// The seam between the scanline driver and the comparator, so memoization
/// can be verified with a call-counting stub.
pub trait Comparator {
    fn matches(&mut self, check: Rgba8, seed: &Seed) -> bool;
}

/// The production comparator: a fixed channel metric, pre-scaled threshold
/// and page background color.
#[derive(Copy, Clone, Debug)]
pub struct ChannelComparator {
    channel: Channel,
    threshold: u32,
    background: Rgba8,
}

impl ChannelComparator {
    /// `threshold` is the user preference in the 0..=100 range.
    pub fn new(channel: Channel, threshold: u32, background: Rgba8) -> Self {
        Self {
            channel,
            threshold: channel.scale_threshold(threshold),
            background,
        }
    }
}

impl Comparator for ChannelComparator {
    fn matches(&mut self, check: Rgba8, seed: &Seed) -> bool {
        compare(check, seed, self.background, self.threshold, self.channel)
    }
}
