pub mod collision;
pub mod input;
pub mod movement;
pub mod render;
pub mod scoring;

pub use collision::*;
pub use input::*;
pub use movement::*;
pub use render::*;
pub use scoring::*;
