use glam::{uvec2, UVec2};

use crate::Rgba;

/// Rectangular pixel buffer stored row by row.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Buffer<P> {
    width: u32,
    height: u32,
    data: Vec<P>,
}

impl<P> AsRef<[P]> for Buffer<P> {
    fn as_ref(&self) -> &[P] {
        &self.data
    }
}

impl<P: Copy> Buffer<P> {
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> P) -> Self {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Buffer {
            width,
            height,
            data,
        }
    }

    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y * self.width + x) as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<P> {
        self.idx(x, y).map(|i| self.data[i])
    }

    pub fn pixels(&self) -> impl Iterator<Item = &P> {
        self.data.iter()
    }

    pub fn dim(&self) -> UVec2 {
        uvec2(self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Buffer<Rgba> {
    pub fn from_png(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = (image.width(), image.height());
        let data = image.pixels().map(|p| Rgba::from(p.0)).collect();

        Ok(Buffer {
            width,
            height,
            data,
        })
    }

    /// Encode the buffer as a PNG image with alpha.
    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        use image::ImageEncoder;

        let raw: Vec<u8> = self
            .data
            .iter()
            .flat_map(|&p| <[u8; 4]>::from(p))
            .collect();

        let mut ret = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut ret);
        encoder.write_image(
            &raw,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;

        Ok(ret)
    }
}
