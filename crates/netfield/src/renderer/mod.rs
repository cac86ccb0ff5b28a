pub mod draw;
pub mod traits;

// Re-export key types for convenient access
pub use draw::{DrawList, DrawOp, OpKind};
pub use traits::Surface;
