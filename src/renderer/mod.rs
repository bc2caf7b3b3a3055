//! Rendering module
//!
//! The painter draws through the `Surface` trait; backends decide what a
//! draw call becomes (canvas calls, recorded commands, triangles).

pub mod draw_list;
pub mod mesh;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use draw_list::{DrawCommand, DrawList};
pub use mesh::MeshSurface;
pub use scene::{palette, render};
pub use surface::{Color, Surface};
pub use vertex::Vertex;
