use thiserror::Error;

/// Reasons a rectangle can be refused by a [`RectanglePacker`].
///
/// An empty packer is not an error; packing it produces an invalid
/// [`PackResult`] instead.
///
/// [`RectanglePacker`]: struct.RectanglePacker.html
/// [`PackResult`]: struct.PackResult.html
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("Rectangle '{key}' has a zero dimension ({width}x{height})")]
    ZeroSize {
        key: String,
        width: u32,
        height: u32,
    },

    #[error("Rectangle '{key}' is {width} wide, which is wider than the maximum canvas width of {max_width}")]
    TooWide {
        key: String,
        width: u32,
        max_width: u32,
    },

    #[error("Rectangle '{key}' is {height} tall, which is taller than the maximum canvas height of {max_height}")]
    TooTall {
        key: String,
        height: u32,
        max_height: u32,
    },

    #[error("Rectangle '{key}' was added more than once")]
    DuplicateKey { key: String },
}
