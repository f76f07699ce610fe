//! codecook - 代码片段搜索与插入
//!
//! 模块结构：
//! - kernel: 片段流程（state / action / effect）、占位符选择、服务端口与 HTTP 适配器
//! - models: 数据模型（TextBuffer, Selection）
//! - tui: 终端宿主编辑器（需要 `tui` feature）

pub mod kernel;
pub mod models;
#[cfg(feature = "tui")]
pub mod tui;
