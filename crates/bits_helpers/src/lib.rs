mod bit;
pub use bit::*;

pub mod assets;
pub mod input;
pub mod rtl;
pub mod screen;
