// Nounlog Common Package
// 日志级别定义和通用错误类型

pub mod types;
pub mod errors;

pub use types::*;
pub use errors::*;
