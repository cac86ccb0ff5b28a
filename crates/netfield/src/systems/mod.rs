pub mod placement;
pub mod render;
pub mod update;
