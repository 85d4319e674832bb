//! Bottle Tracker 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route` / `web::router`: 路由定义与路由服务
//! - `session`: 令牌存储（本地过期检查）
//! - `auth`: 认证状态管理（服务端校验）
//! - `api`: 远程 REST API 客户端
//! - `components`: UI 组件层

mod api;
mod auth;
mod session;

mod components {
    pub mod add_wine;
    mod confirm_dialog;
    pub mod edit_wine;
    mod general_error;
    mod header;
    pub mod home;
    mod icons;
    pub mod login;
    mod rating_badge;
    pub mod register;
    pub mod search;
    pub mod wine_detail;
    mod wine_form;
    pub mod wines;
}

// 原生 Web API 封装模块
// 提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web;

use leptos::prelude::*;

use crate::api::Api;
use crate::auth::{AuthContext, init_auth};
use crate::components::add_wine::AddWinePage;
use crate::components::edit_wine::EditWinePage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::search::WineSearchPage;
use crate::components::wine_detail::WineDetailPage;
use crate::components::wines::WineCollectionPage;
use crate::session::TokenStore;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login { username } => view! { <LoginPage username=username /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Wines => view! { <WineCollectionPage /> }.into_any(),
        AppRoute::AddWine { barcode } => view! { <AddWinePage barcode=barcode /> }.into_any(),
        AppRoute::SearchWines => view! { <WineSearchPage /> }.into_any(),
        AppRoute::WineDetail { id } => view! { <WineDetailPage id=id /> }.into_any(),
        AppRoute::EditWine { id } => view! { <EditWinePage id=id /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 全局依赖：令牌存储与 API 客户端（显式注入，不做模块级单例）
    let tokens = TokenStore::new();
    provide_context(tokens);
    let api = Api::from_window(tokens);
    provide_context(api.clone());

    // 2. 认证上下文与一次性的挂载时校验
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(&auth_ctx, &api, tokens);

    // 3. 认证信号注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();
    let is_loading = auth_ctx.is_loading_signal();

    view! {
        // 4. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated is_loading=is_loading>
            // 初始校验完成前全局显示加载态，页面只在认证状态落定后挂载
            <Show
                when=move || !is_loading.get()
                fallback=|| view! {
                    <div class="flex items-center justify-center min-h-screen">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <RouterOutlet matcher=route_matcher />
            </Show>
        </Router>
    }
}
