// 配置管理模块
// 处理日志门面配置、配置提供者和环境变量

pub mod settings;
pub mod loader;
pub mod validator;

#[cfg(test)]
mod tests;

pub use settings::*;
pub use loader::*;
pub use validator::*;
