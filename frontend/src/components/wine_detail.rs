//! 单瓶详情页面
//!
//! 挂载时按 id 拉取记录；删除需经确认对话框，成功后回到列表，
//! 失败在原地给出错误且不跳转。

use leptos::prelude::*;
use leptos::task::spawn_local;

use bottle_tracker_shared::GetWineDTO;

use crate::api::Api;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::header::Header;
use crate::components::icons::{ArrowLeft, Barcode, Pencil, Trash2};
use crate::components::rating_badge::RatingBadge;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

#[component]
pub fn WineDetailPage(id: String) -> impl IntoView {
    let api = expect_context::<Api>();
    let navigate = use_navigate();

    let (wine, set_wine) = signal(Option::<GetWineDTO>::None);
    let (is_loading, set_is_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);
    let (is_deleting, set_is_deleting) = signal(false);
    let (delete_error, set_delete_error) = signal(Option::<String>::None);
    let confirm_open = RwSignal::new(false);

    // 挂载时拉取记录
    {
        let api = api.clone();
        let id = id.clone();
        spawn_local(async move {
            match api.get_wine_by_id(&id).await {
                Ok(w) => set_wine.set(Some(w)),
                Err(e) => set_load_error.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    }

    let on_confirm_delete = {
        let api = api.clone();
        let id = id.clone();
        let navigate = navigate.clone();
        Callback::new(move |_| {
            let api = api.clone();
            let id = id.clone();
            let navigate = navigate.clone();
            set_delete_error.set(None);
            set_is_deleting.set(true);
            spawn_local(async move {
                match api.delete_wine(&id).await {
                    Ok(()) => navigate(AppRoute::Wines),
                    Err(e) => {
                        set_delete_error.set(Some(e.to_string()));
                        set_is_deleting.set(false);
                    }
                }
            });
        })
    };

    let nav_back = navigate.clone();
    let nav_edit = navigate.clone();
    let edit_id = id.clone();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-3xl mx-auto space-y-8">
                <Header title="Details" />

                <button class="btn btn-ghost gap-2" on:click=move |_| nav_back(AppRoute::Wines)>
                    <ArrowLeft attr:class="h-4 w-4" /> "Back to collection"
                </button>

                <Show when=move || is_loading.get()>
                    <div class="flex justify-center py-12">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                </Show>

                <Show when=move || load_error.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || load_error.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                {move || {
                    wine.get()
                        .map(|w| {
                            let nav_edit = nav_edit.clone();
                            let edit_id = edit_id.clone();
                            view! {
                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body space-y-2">
                                        <div class="flex items-center justify-between">
                                            <h2 class="card-title text-2xl">{w.name.clone()}</h2>
                                            <RatingBadge rating=w.rating />
                                        </div>
                                        <p class="text-base-content/70">
                                            {w.country.clone()}
                                            {w.vintage_year
                                                .map(|y| format!(" · {}", y))
                                                .unwrap_or_default()}
                                        </p>
                                        <div class="badge badge-accent badge-outline">
                                            {w.wine_type.label()}
                                        </div>
                                        {w
                                            .barcode
                                            .clone()
                                            .map(|code| {
                                                view! {
                                                    <p class="flex items-center gap-2 font-mono text-sm opacity-70">
                                                        <Barcode attr:class="h-4 w-4" /> {code}
                                                    </p>
                                                }
                                            })}

                                        <Show when=move || delete_error.get().is_some()>
                                            <div role="alert" class="alert alert-error text-sm py-2">
                                                <span>{move || delete_error.get().unwrap_or_default()}</span>
                                            </div>
                                        </Show>

                                        <div class="card-actions justify-end mt-4">
                                            <button
                                                class="btn btn-outline gap-2"
                                                on:click=move |_| nav_edit(AppRoute::EditWine {
                                                    id: edit_id.clone(),
                                                })
                                            >
                                                <Pencil attr:class="h-4 w-4" /> "Edit"
                                            </button>
                                            <button
                                                class="btn btn-error btn-outline gap-2"
                                                disabled=move || is_deleting.get()
                                                on:click=move |_| confirm_open.set(true)
                                            >
                                                <Trash2 attr:class="h-4 w-4" />
                                                {move || if is_deleting.get() { "Deleting..." } else { "Delete" }}
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        })
                }}

                <ConfirmDialog
                    open=confirm_open
                    title="Delete this wine?"
                    message="This removes the bottle from your collection. There is no undo."
                    confirm_label="Delete"
                    on_confirm=on_confirm_delete
                />
            </div>
        </div>
    }
}
