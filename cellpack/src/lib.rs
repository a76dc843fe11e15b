//! Cellpack packs named rectangles, like glyph bitmaps or sprites, into a
//! single canvas for building texture atlases.
//!
//! Rectangles are placed tallest first into the smallest free cell that holds
//! them. The packer searches over canvas sizes, growing the canvas taller when
//! the rectangles don't fit and narrower when they do, and returns the
//! smallest packing it came across.
//!
//! ## Example
//! ```
//! use cellpack::RectanglePacker;
//!
//! // Payloads can be anything the caller wants back after packing, like the
//! // decoded image for each rectangle. The packer only borrows them.
//! let images = ["grass", "stone", "water"];
//!
//! let mut packer = RectanglePacker::new(256);
//! packer.add_rectangle("grass.png", (128, 64), &images[0])?;
//! packer.add_rectangle("stone.png", (64, 64), &images[1])?;
//! packer.add_rectangle("water.png", (1, 200), &images[2])?;
//!
//! let result = packer.pack()?;
//! assert!(result.is_valid());
//!
//! for placement in result.placements() {
//!     println!("{} -> {:?}", placement.payload(), placement.position());
//! }
//! # Ok::<(), cellpack::PackError>(())
//! ```

mod error;
mod free_cells;
mod geometry;
mod packer;
mod registry;
mod types;

pub use error::*;
pub use geometry::*;
pub use registry::*;
pub use types::*;
