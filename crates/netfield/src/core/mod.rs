pub mod field;
pub mod node;
pub mod pointer;
pub mod rng;
pub mod scheduler;
pub mod time;
