use derive_more::From;

/// 8-bit RGBA color, not premultiplied.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug, From)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    /// Color with an opacity in [0, 1] turned into alpha.
    pub fn with_opacity([r, g, b]: [u8; 3], opacity: f32) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0x00
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Rgba { r, g, b, a }
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}
