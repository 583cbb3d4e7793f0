//! Leaf value types shared across the document graph

pub mod color;
pub mod handle;
pub mod line_weight;
pub mod vector;
pub mod version;

pub use color::Color;
pub use handle::Handle;
pub use line_weight::LineWeight;
pub use vector::{Vector2, Vector3};
pub use version::CadVersion;
