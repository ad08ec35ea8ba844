mod album_mapping;
mod batch;
mod context;
mod notify;
mod pipeline;

pub use album_mapping::*;
pub use batch::*;
pub use context::*;
pub use notify::*;
pub use pipeline::*;
