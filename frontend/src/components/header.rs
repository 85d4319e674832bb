//! 认证后页面的顶部导航栏

use leptos::prelude::*;

use crate::auth::{logout, use_auth};
use crate::components::icons::{LogOut, Plus, Search, Wine};
use crate::session::TokenStore;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

#[component]
pub fn Header(#[prop(into)] title: String) -> impl IntoView {
    let auth = use_auth();
    let tokens = use_context::<TokenStore>().unwrap_or_default();
    let navigate = use_navigate();

    let on_logout = move |_| {
        // 导航由路由服务的认证状态监听自动处理
        logout(&auth, tokens);
    };

    let nav_collection = navigate.clone();
    let nav_search = navigate.clone();
    let nav_add = navigate.clone();

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-2">
                <Wine attr:class="text-primary h-6 w-6" />
                <a
                    class="btn btn-ghost text-xl"
                    on:click=move |_| nav_collection(AppRoute::Wines)
                >
                    "Bottle Tracker"
                </a>
                <span class="badge badge-neutral hidden md:inline-flex">{title}</span>
            </div>
            <div class="flex-none gap-2">
                <button
                    class="btn btn-ghost gap-2"
                    on:click=move |_| nav_search(AppRoute::SearchWines)
                >
                    <Search attr:class="h-4 w-4" /> "Search"
                </button>
                <button
                    class="btn btn-primary gap-2"
                    on:click=move |_| nav_add(AppRoute::AddWine { barcode: None })
                >
                    <Plus attr:class="h-4 w-4" /> "Add wine"
                </button>
                <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                    <LogOut attr:class="h-4 w-4" /> "Log out"
                </button>
            </div>
        </div>
    }
}
