pub mod traits;
pub mod model;
pub mod loader;

pub use traits::Graph;
pub use model::{GraphModel, Node, Weight};
pub use loader::{EdgeDescription, GraphDescription};
