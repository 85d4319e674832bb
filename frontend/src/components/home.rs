//! 欢迎页
//!
//! 公开落地页，按认证状态分流到酒藏或登录/注册。

use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::Wine;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let is_authenticated = move || auth.state.get().is_authenticated;

    let nav_wines = navigate.clone();
    let nav_login = navigate.clone();
    let nav_register = navigate.clone();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md flex flex-col items-center gap-4">
                    <div class="p-4 bg-primary/10 rounded-2xl text-primary">
                        <Wine attr:class="h-12 w-12" />
                    </div>
                    <h1 class="text-5xl font-bold">"Bottle Tracker"</h1>
                    <p class="text-base-content/70">
                        "Keep track of every bottle in your collection: add wines by barcode, rate them, and never buy the same disappointment twice."
                    </p>
                    <Show
                        when=is_authenticated
                        fallback=move || {
                            let nav_login = nav_login.clone();
                            let nav_register = nav_register.clone();
                            view! {
                                <div class="flex gap-2">
                                    <button
                                        class="btn btn-primary"
                                        on:click=move |_| nav_login(AppRoute::Login { username: None })
                                    >
                                        "Log in"
                                    </button>
                                    <button
                                        class="btn btn-outline"
                                        on:click=move |_| nav_register(AppRoute::Register)
                                    >
                                        "Register"
                                    </button>
                                </div>
                            }
                        }
                    >
                        <button class="btn btn-primary" on:click={
                            let nav_wines = nav_wines.clone();
                            move |_| nav_wines(AppRoute::Wines)
                        }>
                            "Open my collection"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
