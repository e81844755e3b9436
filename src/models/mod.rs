pub mod catalog;
pub mod image;
pub mod quota;

pub use catalog::*;
pub use image::*;
pub use quota::*;
