//! 认证模块
//!
//! 管理认证状态（是否已认证/校验中/错误），与路由系统解耦：
//! 路由服务通过注入的信号检查认证状态并完成重定向，
//! 本模块自身从不直接导航。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{Api, ApiError};
use crate::session::TokenStore;

/// 认证状态
///
/// 派生值，不落盘；token 变化或校验请求落定时重算。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    /// 是否已认证
    pub is_authenticated: bool,
    /// 初始 token 校验是否仍在进行
    pub is_loading: bool,
    /// 校验失败的原因（不阻塞重新登录）
    pub error: Option<String>,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 认证信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }

    /// 加载信号（用于路由守卫与全局 loading 遮罩）
    pub fn is_loading_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_loading)
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 无 token：直接落定为未认证，不发起网络调用。
/// 有 token：置为加载中并发起一次服务端校验（每次挂载仅一次，
/// 不做定时重校验；本地过期检查已经是廉价的第一道闸）。
pub fn init_auth(ctx: &AuthContext, api: &Api, tokens: TokenStore) {
    if tokens.get().is_none() {
        ctx.set_state.set(AuthState::default());
        return;
    }

    ctx.set_state.set(AuthState {
        is_authenticated: false,
        is_loading: true,
        error: None,
    });

    let api = api.clone();
    let set_state = ctx.set_state;
    spawn_local(async move {
        let result = api.validate_token().await;
        apply_validation(set_state, tokens, result);
    });
}

/// 校验结果落定到状态；失败时同时清除本地 token
fn apply_validation(
    set_state: WriteSignal<AuthState>,
    tokens: TokenStore,
    result: Result<(), ApiError>,
) {
    match result {
        Ok(()) => set_state.set(AuthState {
            is_authenticated: true,
            is_loading: false,
            error: None,
        }),
        Err(e) => {
            tokens.remove();
            set_state.set(AuthState {
                is_authenticated: false,
                is_loading: false,
                error: Some(e.to_string()),
            });
        }
    }
}

/// 登录成功后写入 token 并翻转认证状态
///
/// 登录接口刚刚验证过凭据，无需再发一次 validate。
pub fn store_login(ctx: &AuthContext, tokens: TokenStore, token: &str) {
    tokens.set(token);
    ctx.set_state.set(AuthState {
        is_authenticated: true,
        is_loading: false,
        error: None,
    });
}

/// 注销并清除状态
///
/// 纯本地操作，不调用服务端；导航由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext, tokens: TokenStore) {
    tokens.logout();
    ctx.set_state.set(AuthState {
        is_authenticated: false,
        is_loading: false,
        error: None,
    });
}

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_success_authenticates() {
        let ctx = AuthContext::new();
        let tokens = TokenStore::new();
        tokens.set("some.jwt.token");

        apply_validation(ctx.set_state, tokens, Ok(()));

        let state = ctx.state.get_untracked();
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
        // token 保留
        assert!(tokens.get().is_some());
    }

    #[test]
    fn validation_failure_clears_token_and_records_error() {
        let ctx = AuthContext::new();
        let tokens = TokenStore::new();
        tokens.set("some.jwt.token");

        apply_validation(
            ctx.set_state,
            tokens,
            Err(ApiError::Failed {
                what: "Session validation failed",
                status_text: "Unauthorized".into(),
            }),
        );

        let state = ctx.state.get_untracked();
        assert!(!state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(
            state.error.as_deref(),
            Some("Session validation failed: Unauthorized")
        );
        assert_eq!(tokens.get(), None);
    }

    #[test]
    fn logout_clears_token_from_any_state() {
        let ctx = AuthContext::new();
        let tokens = TokenStore::new();
        tokens.set("some.jwt.token");
        store_login(&ctx, tokens, "some.jwt.token");
        assert!(ctx.state.get_untracked().is_authenticated);

        logout(&ctx, tokens);
        assert!(!ctx.state.get_untracked().is_authenticated);
        assert_eq!(tokens.get(), None);

        // 已登出状态下重复登出无副作用
        logout(&ctx, tokens);
        assert!(!ctx.state.get_untracked().is_authenticated);
    }

    #[test]
    fn store_login_persists_token() {
        let ctx = AuthContext::new();
        let tokens = TokenStore::new();
        tokens.remove();

        store_login(&ctx, tokens, "fresh.jwt.token");
        assert_eq!(tokens.get().as_deref(), Some("fresh.jwt.token"));
        assert!(ctx.state.get_untracked().is_authenticated);
    }
}
