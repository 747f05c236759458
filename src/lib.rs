pub mod convert;
pub mod error;
pub mod ft;
pub mod params;
pub mod profile;
pub mod render;
pub mod utils;
pub mod wave;
pub mod window;

pub use error::{Error, Result};
