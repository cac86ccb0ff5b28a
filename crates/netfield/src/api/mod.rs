pub mod activation;
pub mod config;
pub mod host;
pub mod overlay;
pub mod palette;
pub mod renderer;
