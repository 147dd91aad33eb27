pub mod canvas;
pub mod renderer;

pub use canvas::{Canvas, CellPaint};
pub use renderer::Renderer;
