// 适配器注册表

use crate::adapters::LogAdapter;
use crate::errors::LogError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 名称到适配器实例的映射，并记录默认适配器名称
#[derive(Default, Clone)]
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn LogAdapter>>,
    default_name: String,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册适配器
    ///
    /// 名称已存在时返回错误，避免静默覆盖。尚未设置默认适配器时，
    /// 第一个注册的适配器成为默认。
    pub fn register(
        &mut self,
        name: impl Into<String>,
        adapter: Arc<dyn LogAdapter>,
    ) -> Result<(), LogError> {
        let name = name.into();
        if self.adapters.contains_key(&name) {
            return Err(LogError::adapter_already_registered(name));
        }

        if self.default_name.is_empty() {
            self.default_name = name.clone();
        }

        debug!(adapter = %name, "注册日志适配器");
        self.adapters.insert(name, adapter);

        Ok(())
    }

    /// 按名称查找适配器
    pub fn get(&self, name: &str) -> Option<Arc<dyn LogAdapter>> {
        self.adapters.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adapters.contains_key(name)
    }

    /// 已注册的适配器名称（排序后）
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.adapters.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// 清空注册表并重置默认名称
    pub fn clear(&mut self) {
        self.adapters.clear();
        self.default_name.clear();
    }

    /// 当前默认适配器名称
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// 显式覆盖默认适配器名称，与注册顺序无关
    pub fn set_default_name(&mut self, name: impl Into<String>) {
        self.default_name = name.into();
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("adapters", &self.names())
            .field("default_name", &self.default_name)
            .finish()
    }
}
