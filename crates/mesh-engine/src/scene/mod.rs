//! Overlay draw stream.
//!
//! Renderer-agnostic commands with deterministic ordering (z layer, then
//! insertion order).

mod cmd;
mod list;

pub use cmd::{Border, DrawCmd};
pub use list::{DrawItem, DrawList, SortKey, ZIndex};
