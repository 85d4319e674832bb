//! 会话令牌存储模块
//!
//! 持有唯一的 Bearer token（JWT），写入浏览器 LocalStorage。
//! 本模块只做本地过期检查（解码 payload 的 `exp` 声明）；
//! 服务端校验由 `auth` 模块的 validate 调用负责。
//!
//! 任何形式的畸形 token 都视为未认证，绝不向用户抛出错误。

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// LocalStorage 中的存储键；整个应用只存这一个值
const TOKEN_STORAGE_KEY: &str = "bottle_tracker_token";

/// 令牌存取句柄
///
/// 作为显式依赖传入 API 客户端与认证控制器，而不是模块级单例，
/// 便于测试中替换存储后端。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenStore;

impl TokenStore {
    pub fn new() -> Self {
        Self
    }

    /// 持久化 token，覆盖已有值
    pub fn set(&self, token: &str) {
        backend::set(token);
    }

    /// 读取当前 token
    pub fn get(&self) -> Option<String> {
        backend::get()
    }

    /// 删除 token；幂等
    pub fn remove(&self) {
        backend::remove();
    }

    /// 登出即删除本地 token，不发起服务端调用
    pub fn logout(&self) {
        self.remove();
    }

    /// 本地过期检查：token 存在且 `exp` 在当前时间之后
    pub fn is_authenticated(&self) -> bool {
        match self.get() {
            Some(token) => token_is_fresh(&token, now_secs()),
            None => false,
        }
    }
}

#[derive(Deserialize)]
struct TokenClaims {
    /// 过期时间，自 epoch 起的秒数
    exp: f64,
}

/// 解出 JWT payload 中的 `exp`；任何解码失败返回 `None`
fn decode_exp(token: &str) -> Option<f64> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(segments[1]).ok()?;
    let payload = std::str::from_utf8(&payload).ok()?;
    let claims: TokenClaims = serde_json::from_str(payload).ok()?;
    Some(claims.exp)
}

/// token 是否仍然有效（`exp` 严格大于 `now_secs`）
pub(crate) fn token_is_fresh(token: &str, now_secs: f64) -> bool {
    match decode_exp(token) {
        Some(exp) => exp > now_secs,
        None => false,
    }
}

fn now_secs() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() / 1000.0
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

// =========================================================
// 存储后端
// =========================================================

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::TOKEN_STORAGE_KEY;
    use crate::web::LocalStorage;

    pub fn set(token: &str) {
        LocalStorage::set(TOKEN_STORAGE_KEY, token);
    }

    pub fn get() -> Option<String> {
        LocalStorage::get(TOKEN_STORAGE_KEY)
    }

    pub fn remove() {
        LocalStorage::delete(TOKEN_STORAGE_KEY);
    }
}

// 非 WASM 目标使用线程本地槽，同一套 TokenStore 代码路径可在宿主机上测试
#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::cell::RefCell;

    thread_local! {
        static TOKEN: RefCell<Option<String>> = const { RefCell::new(None) };
    }

    pub fn set(token: &str) {
        TOKEN.with(|slot| *slot.borrow_mut() = Some(token.to_string()));
    }

    pub fn get() -> Option<String> {
        TOKEN.with(|slot| slot.borrow().clone())
    }

    pub fn remove() {
        TOKEN.with(|slot| *slot.borrow_mut() = None);
    }
}

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// 构造一个结构合法的测试 JWT
    fn make_token(payload: &str) -> String {
        format!(
            "eyJhbGciOiJIUzI1NiJ9.{}.c2lnbmF0dXJl",
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn fresh_token_is_authenticated() {
        let token = make_token(r#"{"sub":"john","exp":2000000000}"#);
        assert!(token_is_fresh(&token, 1000000000.0));
    }

    #[test]
    fn expired_token_is_not_authenticated() {
        let token = make_token(r#"{"sub":"john","exp":1000000000}"#);
        assert!(!token_is_fresh(&token, 2000000000.0));
        // 恰好等于当前时间也算过期
        assert!(!token_is_fresh(&token, 1000000000.0));
    }

    #[test]
    fn malformed_tokens_never_authenticate() {
        let now = 0.0;
        // 段数不对
        assert!(!token_is_fresh("not-a-jwt", now));
        assert!(!token_is_fresh("only.two", now));
        assert!(!token_is_fresh("a.b.c.d", now));
        // base64 非法
        assert!(!token_is_fresh("h.!!!.s", now));
        // payload 不是 JSON
        let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode("garbage"));
        assert!(!token_is_fresh(&token, now));
        // 缺少 exp 声明
        let token = make_token(r#"{"sub":"john"}"#);
        assert!(!token_is_fresh(&token, now));
        // 空字符串
        assert!(!token_is_fresh("", now));
    }

    #[test]
    fn store_set_get_remove() {
        let store = TokenStore::new();
        store.remove();
        assert_eq!(store.get(), None);
        assert!(!store.is_authenticated());

        store.set("abc");
        assert_eq!(store.get().as_deref(), Some("abc"));

        store.set("def");
        assert_eq!(store.get().as_deref(), Some("def"));

        store.remove();
        assert_eq!(store.get(), None);
        // 幂等
        store.remove();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn logout_always_clears_token() {
        let store = TokenStore::new();
        let token = make_token(r#"{"exp":99999999999}"#);
        store.set(&token);
        assert!(store.is_authenticated());

        store.logout();
        assert_eq!(store.get(), None);
        assert!(!store.is_authenticated());

        // 未登录状态下登出同样安全
        store.logout();
        assert!(!store.is_authenticated());
    }
}
