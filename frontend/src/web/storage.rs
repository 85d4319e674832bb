//! LocalStorage 封装模块
//!
//! 通过 `web_sys::Storage` 访问浏览器持久化键值存储。
//! 所有失败（隐私模式、配额、无 window）都折叠为 `None`/`false`，
//! 调用方不需要处理存储层错误。

/// 本地存储操作封装
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 读取键对应的字符串值；键不存在或访问失败返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 写入键值对，返回是否成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除键值对（键不存在时也视为成功，幂等）
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
