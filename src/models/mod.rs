pub mod click;
#[cfg(feature = "server")]
pub mod config;
pub mod product;
