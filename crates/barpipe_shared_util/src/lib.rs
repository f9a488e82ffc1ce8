pub mod atomic;
pub mod block;
pub mod paths;
pub mod wake;
pub mod wrappers;

pub use atomic::*;
pub use block::*;
pub use paths::*;
pub use wrappers::*;
