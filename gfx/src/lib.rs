//! Software rendering of perception masks.

mod buffer;
pub use buffer::Buffer;

mod overlay;
pub use overlay::{render_overlay, View};

mod pixel;
pub use pixel::Rgba;
