pub mod category;
pub mod entry;
pub mod group;
pub mod util;

pub use category::*;
pub use entry::*;
pub use group::*;
