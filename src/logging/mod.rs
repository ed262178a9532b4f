// 日志系统模块
// 名词过滤、格式模板、日志器与分发核心

pub mod setup;
pub mod context;
pub mod filters;
pub mod template;
pub mod state;
pub mod logger;


pub use setup::*;
pub use context::*;
pub use filters::*;
pub use template::*;
pub use state::*;
pub use logger::*;
