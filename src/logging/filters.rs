// 名词过滤器

use std::collections::BTreeSet;

/// 名词包含/排除过滤集合
///
/// 只要存在任意包含规则，就进入白名单模式：未显式包含的名词一律拒绝，
/// 排除规则不再参与判断。没有包含规则时才使用排除列表。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    include_nouns: BTreeSet<String>,
    use_include: bool,
    exclude_nouns: BTreeSet<String>,
    use_exclude: bool,
}

impl FilterSet {
    /// 创建空过滤集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加包含过滤
    pub fn add_include(&mut self, noun: impl Into<String>) {
        self.include_nouns.insert(noun.into());
        self.use_include = true;
    }

    /// 移除包含过滤
    pub fn remove_include(&mut self, noun: &str) {
        self.include_nouns.remove(noun);
        self.use_include = !self.include_nouns.is_empty();
    }

    /// 添加排除过滤
    pub fn add_exclude(&mut self, noun: impl Into<String>) {
        self.exclude_nouns.insert(noun.into());
        self.use_exclude = true;
    }

    /// 移除排除过滤
    pub fn remove_exclude(&mut self, noun: &str) {
        self.exclude_nouns.remove(noun);
        self.use_exclude = !self.exclude_nouns.is_empty();
    }

    /// 整体替换包含列表
    pub fn replace_include<I, S>(&mut self, nouns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_nouns = nouns.into_iter().map(Into::into).collect();
        self.use_include = !self.include_nouns.is_empty();
    }

    /// 整体替换排除列表
    pub fn replace_exclude<I, S>(&mut self, nouns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_nouns = nouns.into_iter().map(Into::into).collect();
        self.use_exclude = !self.exclude_nouns.is_empty();
    }

    /// 清空全部过滤
    pub fn clear(&mut self) {
        self.replace_include(Vec::<String>::new());
        self.replace_exclude(Vec::<String>::new());
    }

    /// 判断名词是否允许输出
    pub fn allow(&self, noun: &str) -> bool {
        if self.include_nouns.contains(noun) {
            return true;
        }

        // 有包含规则但未命中，直接拒绝
        if self.use_include {
            return false;
        }

        !self.exclude_nouns.contains(noun)
    }

    /// 是否处于白名单模式
    pub fn use_include(&self) -> bool {
        self.use_include
    }

    /// 是否启用排除列表
    pub fn use_exclude(&self) -> bool {
        self.use_exclude
    }

    pub fn include_nouns(&self) -> impl Iterator<Item = &str> {
        self.include_nouns.iter().map(String::as_str)
    }

    pub fn exclude_nouns(&self) -> impl Iterator<Item = &str> {
        self.exclude_nouns.iter().map(String::as_str)
    }

    /// 包含列表（逗号分隔）
    pub fn include_csv(&self) -> String {
        self.include_nouns().collect::<Vec<_>>().join(",")
    }

    /// 排除列表（逗号分隔）
    pub fn exclude_csv(&self) -> String {
        self.exclude_nouns().collect::<Vec<_>>().join(",")
    }
}
