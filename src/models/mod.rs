//! 数据模型层

pub mod selection;
pub mod text_buffer;

pub use selection::Selection;
pub use text_buffer::{slice_to_cow, TextBuffer};
