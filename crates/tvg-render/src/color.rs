#![forbid(unsafe_code)]

//! Packed ARGB color and Porter-Duff compositing.

/// A packed 32-bit color.
///
/// - **Layout:** `0xAARRGGBB` (A in bits 31..24, B in bits 7..0), the layout
///   host toolkits use for integer colors.
/// - **Alpha:** straight (RGB channels are not pre-multiplied).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct Argb(pub u32);

impl Argb {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Opaque mid gray.
    pub const GRAY: Self = Self::rgb(0x88, 0x88, 0x88);

    /// Opaque color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(255, r, g, b)
    }

    /// Color with explicit alpha.
    #[inline]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Reinterpret a signed host color integer.
    #[inline]
    pub const fn from_i32(v: i32) -> Self {
        Self(v as u32)
    }

    /// Signed form, as host toolkits print colors (`0xFFFFFFFF` is `-1`).
    #[inline]
    pub const fn to_i32(self) -> i32 {
        self.0 as i32
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Same color with alpha replaced.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::argb(a, self.r(), self.g(), self.b())
    }

    /// Alpha byte for a unit alpha, rounded up: `ceil(alpha * 255)`.
    ///
    /// Out-of-range input is clamped.
    #[inline]
    pub fn alpha_from_unit(alpha: f32) -> u8 {
        (alpha.clamp(0.0, 1.0) * 255.0).ceil().clamp(0.0, 255.0) as u8
    }

    #[inline]
    const fn div_round_u8(numer: u64, denom: u64) -> u8 {
        debug_assert!(denom != 0);
        let v = (numer + (denom / 2)) / denom;
        if v > 255 { 255 } else { v as u8 }
    }

    /// Scale alpha by an 8-bit coverage value.
    #[inline]
    pub const fn with_coverage(self, coverage: u8) -> Self {
        if coverage == 255 {
            return self;
        }
        let a = Self::div_round_u8(self.a() as u64 * coverage as u64, 255);
        self.with_alpha(a)
    }

    /// Porter-Duff SourceOver: `self over dst`.
    ///
    /// Computed in exact rational form and rounded once at the end.
    #[inline]
    pub fn over(self, dst: Self) -> Self {
        let s_a = self.a() as u64;
        if s_a == 255 {
            return self;
        }
        if s_a == 0 {
            return dst;
        }

        let d_a = dst.a() as u64;
        let inv_s_a = 255 - s_a;

        // numer_a = 255*s_a + d_a*(255 - s_a), in the 255^2 domain.
        let numer_a = 255 * s_a + d_a * inv_s_a;
        let out_a = Self::div_round_u8(numer_a, 255);

        let channel = |s: u8, d: u8| {
            Self::div_round_u8(
                (s as u64) * s_a * 255 + (d as u64) * d_a * inv_s_a,
                numer_a,
            )
        };

        Self::argb(
            out_a,
            channel(self.r(), dst.r()),
            channel(self.g(), dst.g()),
            channel(self.b(), dst.b()),
        )
    }

    /// Porter-Duff DestinationOut: keep `dst` where `self` is absent.
    ///
    /// Only the source alpha matters. Color channels of `dst` are kept; a
    /// fully erased pixel collapses to [`Argb::TRANSPARENT`].
    #[inline]
    pub fn erase_from(self, dst: Self) -> Self {
        let s_a = self.a() as u64;
        if s_a == 0 {
            return dst;
        }
        let out_a = Self::div_round_u8(dst.a() as u64 * (255 - s_a), 255);
        if out_a == 0 {
            Self::TRANSPARENT
        } else {
            dst.with_alpha(out_a)
        }
    }
}

impl From<u32> for Argb {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
