use std::fmt;

/// RGBA color with 8-bit channels. Pixels coming out of the renderer are
/// alpha-premultiplied; [`unpremultiply`] recovers the straight channel value.
#[repr(C)]
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
    pub const WHITE: Self = Self {
        r: 0xff,
        g: 0xff,
        b: 0xff,
        a: 0xff,
    };
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0xff,
    };
    pub const RED: Self = Self {
        r: 0xff,
        g: 0,
        b: 0,
        a: 0xff,
    };
    pub const BLUE: Self = Self {
        r: 0,
        g: 0,
        b: 0xff,
        a: 0xff,
    };

    /// Create a new [`Rgba8`] color from individual channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Recover a straight channel value from a premultiplied one.
pub fn unpremultiply(channel: u8, alpha: u8) -> u8 {
    if alpha == 0 {
        0
    } else {
        ((channel as u32 * 255 + alpha as u32 / 2) / alpha as u32) as u8
    }
}

/// Merge a premultiplied pixel onto an opaque background color. The output
/// alpha is always 255: the page background cannot be translucent.
pub fn compose_onto(px: Rgba8, bg: Rgba8) -> Rgba8 {
    let merge = |c: u8, b: u8| -> u8 {
        (((255 - px.a as u32) * b as u32 + 255 * c as u32 + 127) / 255) as u8
    };

    Rgba8::new(
        merge(px.r, bg.r),
        merge(px.g, bg.g),
        merge(px.b, bg.b),
        0xff,
    )
}

/// Convert straight RGB channels (0..=1) to hue, saturation and lightness,
/// each in the 0..=1 range.
pub fn rgb_to_hsl(r: f32, g: f32, b: f32) -> [f32; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max <= min {
        return [0.0, 0.0, l];
    }

    let delta = max - min;
    let s = if l <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let mut h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    h /= 6.0;

    [h, s, l]
}
