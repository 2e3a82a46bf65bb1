//! HTTP Handlers

mod ping;
mod podcast;
mod topics;

pub use ping::*;
pub use podcast::*;
pub use topics::*;
