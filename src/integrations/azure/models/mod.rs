mod compute;
mod error;
mod network;
mod resources;
mod storage;

pub use compute::*;
pub use error::*;
pub use network::*;
pub use resources::*;
pub use storage::*;
