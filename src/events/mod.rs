pub mod pointer;
pub mod window;

pub use pointer::wire_pointermove;
pub use window::{wire_resize, wire_scroll};
