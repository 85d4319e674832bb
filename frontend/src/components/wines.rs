//! 酒藏列表页面
//!
//! 挂载时加载全部记录；失败时给出 "Try Again" 重试入口。

use leptos::prelude::*;
use leptos::task::spawn_local;

use bottle_tracker_shared::{GetWineDTO, WineRating};

use crate::api::Api;
use crate::components::header::Header;
use crate::components::icons::Plus;
use crate::components::rating_badge::RatingBadge;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

#[component]
pub fn WineCollectionPage() -> impl IntoView {
    let api = expect_context::<Api>();
    let navigate = use_navigate();

    let (wines, set_wines) = signal(Vec::<GetWineDTO>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    let load_wines = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_is_loading.set(true);
            set_error.set(None);
            spawn_local(async move {
                match api.get_all_wines().await {
                    Ok(data) => set_wines.set(data),
                    Err(e) => set_error.set(Some(e.to_string())),
                }
                set_is_loading.set(false);
            });
        }
    };

    // 初始加载
    load_wines();
    let retry = load_wines.clone();

    let total_bottles = move || wines.with(|w| w.len());
    let rated_bottles =
        move || wines.with(|w| w.iter().filter(|x| x.rating != WineRating::None).count());

    let nav_row = navigate.clone();
    let nav_add_empty = navigate.clone();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Header title="Collection" />

                <Show when=move || error.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error.get().unwrap_or_default()}</span>
                        <button class="btn btn-sm" on:click={
                            let retry = retry.clone();
                            move |_| retry()
                        }>
                            "Try Again"
                        </button>
                    </div>
                </Show>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"Bottles"</div>
                        <div class="stat-value text-primary">{total_bottles}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Rated"</div>
                        <div class="stat-value text-secondary">{rated_bottles}</div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">"My wines"</h3>
                                <p class="text-base-content/70 text-sm">
                                    "Everything currently in your cellar."
                                </p>
                            </div>
                        </div>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"Country"</th>
                                        <th class="hidden md:table-cell">"Vintage"</th>
                                        <th class="hidden md:table-cell">"Type"</th>
                                        <th>"Rating"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || total_bottles() == 0 && !is_loading.get() && error.get().is_none()>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                "No wines in your collection yet. "
                                                <a
                                                    class="link link-primary"
                                                    on:click={
                                                        let nav_add_empty = nav_add_empty.clone();
                                                        move |_| nav_add_empty(AppRoute::AddWine { barcode: None })
                                                    }
                                                >
                                                    <Plus attr:class="inline h-4 w-4" /> " Add your first bottle"
                                                </a>
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || is_loading.get() && total_bottles() == 0>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " Loading..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || wines.get()
                                        key=|w| w.id.clone()
                                        children=move |wine| {
                                            let nav_detail = nav_row.clone();
                                            let id = wine.id.clone();
                                            view! {
                                                <tr
                                                    class="cursor-pointer hover"
                                                    on:click=move |_| nav_detail(AppRoute::WineDetail { id: id.clone() })
                                                >
                                                    <td class="font-bold">{wine.name}</td>
                                                    <td>{wine.country}</td>
                                                    <td class="hidden md:table-cell">
                                                        {wine
                                                            .vintage_year
                                                            .map(|y| y.to_string())
                                                            .unwrap_or_else(|| "–".to_string())}
                                                    </td>
                                                    <td class="hidden md:table-cell">
                                                        <div class="badge badge-accent badge-outline">
                                                            {wine.wine_type.label()}
                                                        </div>
                                                    </td>
                                                    <td>
                                                        <RatingBadge rating=wine.rating />
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
