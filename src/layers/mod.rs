pub mod icon;
pub mod model;
pub mod resolver;
pub mod style;
