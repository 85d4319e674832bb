//! 路由服务模块 - 核心引擎
//!
//! 封装 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 认证状态通过注入的信号参与守卫决策，与认证系统解耦；
//! 初始校验 (`is_loading`) 期间守卫保持静默，等状态落定后再统一重定向。

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径（含 query string）
fn current_url() -> String {
    web_sys::window()
        .map(|w| {
            let location = w.location();
            let path = location.pathname().unwrap_or_else(|_| "/".to_string());
            let query = location.search().unwrap_or_default();
            format!("{}{}", path, query)
        })
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }
}

/// 替换 History 状态（用于重定向）
fn replace_history_state(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
    /// 初始 token 校验是否仍在进行
    is_loading: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>, is_loading: Signal<bool>) -> Self {
        // 初始路由直接从 URL 解析；守卫由 setup_auth_redirect 在认证状态
        // 落定后统一执行，避免在校验完成前误踢掉深链接
        let initial_route = AppRoute::from_url(&current_url());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
            is_loading,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let target_route = self.guard(target_route);
        let url = target_route.to_url();
        if use_push {
            push_history_state(&url);
        } else {
            replace_history_state(&url);
        }
        self.set_route.set(target_route);
    }

    /// 守卫决策：返回实际允许进入的路由
    fn guard(&self, target_route: AppRoute) -> AppRoute {
        // 校验尚未落定时放行，认证状态变化的 Effect 会补做重定向
        if self.is_loading.get_untracked() {
            return target_route;
        }

        let is_auth = self.is_authenticated.get_untracked();

        if target_route.requires_auth() && !is_auth {
            web_sys::console::log_1(&"[Router] Access denied. Redirecting to login.".into());
            return AppRoute::auth_failure_redirect();
        }

        if target_route.should_redirect_when_authenticated() && is_auth {
            web_sys::console::log_1(&"[Router] Already authenticated. Redirecting to wines.".into());
            return AppRoute::auth_success_redirect();
        }

        target_route
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let service = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_url(&current_url());
            let guarded = service.guard(target_route.clone());
            // popstate 后重定向不应产生新的历史记录
            if guarded != target_route {
                replace_history_state(&guarded.to_url());
            }
            service.set_route.set(guarded);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;
        let is_loading = self.is_loading;

        Effect::new(move |_| {
            // 等 token 校验结束后再做任何重定向
            if is_loading.get() {
                return;
            }

            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            if is_auth && route.should_redirect_when_authenticated() {
                // 刚登录：离开登录/注册页
                let redirect = AppRoute::auth_success_redirect();
                push_history_state(&redirect.to_url());
                set_route.set(redirect);
                web_sys::console::log_1(
                    &"[Router] Auth state changed: logged in, redirecting to wines.".into(),
                );
            } else if !is_auth && route.requires_auth() {
                // 登出或校验失败：离开受保护页面
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(&redirect.to_url());
                set_route.set(redirect);
                web_sys::console::log_1(
                    &"[Router] Auth state changed: logged out, redirecting to login.".into(),
                );
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>, is_loading: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated, is_loading);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(AppRoute) + Clone {
    let router = use_router();
    move |to: AppRoute| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 初始校验加载信号
    is_loading: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated, is_loading);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
