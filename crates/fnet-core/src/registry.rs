//! 依插入順序排列的登錄表
//!
//! 迭代順序即插入順序。成本相同時的排序結果依賴此順序，
//! 因此不可改用無序映射。

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{NetworkError, Result};

/// 具有唯一識別碼的實體
pub trait Keyed {
    fn key(&self) -> &str;
}

/// 有序登錄表（索引列表 + 查詢索引）
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Keyed> Registry<T> {
    /// 創建空的登錄表
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// 新增實體，識別碼重複時拒絕
    pub fn insert(&mut self, entry: T) -> Result<()> {
        let key = entry.key().to_string();
        if self.index.contains_key(&key) {
            return Err(NetworkError::DuplicateId(key));
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.entries[i]),
            None => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// 依插入順序迭代
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// 依插入順序的切片（供平行迭代使用）
    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Keyed> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Keyed> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// 序列化為有序列表，反序列化時重建索引
impl<T: Keyed + Serialize> Serialize for Registry<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, T: Keyed + Deserialize<'de>> Deserialize<'de> for Registry<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = Vec::<T>::deserialize(deserializer)?;
        let mut registry = Registry::new();
        for entry in entries {
            registry.insert(entry).map_err(serde::de::Error::custom)?;
        }
        Ok(registry)
    }
}
