pub(crate) mod decode;
pub mod font;
pub(crate) mod svg_raster;
pub mod texture;
