pub mod color;
pub mod geo;
