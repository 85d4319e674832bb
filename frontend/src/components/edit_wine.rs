//! 编辑葡萄酒页面
//!
//! 挂载时按 id 拉取现有记录填充表单；提交发送完整 DTO（不做局部 diff），
//! 成功后跳转到详情页。

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::Api;
use crate::components::general_error::GeneralError;
use crate::components::header::Header;
use crate::components::icons::ArrowLeft;
use crate::components::wine_form::{WineFormFields, WineFormState};
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

#[component]
pub fn EditWinePage(id: String) -> impl IntoView {
    let api = expect_context::<Api>();
    let navigate = use_navigate();

    let state = WineFormState::new();
    let (is_loading_wine, set_is_loading_wine) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);

    // 挂载时用现有记录填充表单
    {
        let api = api.clone();
        let id = id.clone();
        spawn_local(async move {
            match api.get_wine_by_id(&id).await {
                Ok(wine) => state.seed_from(&wine),
                Err(e) => set_load_error.set(Some(e.to_string())),
            }
            set_is_loading_wine.set(false);
        });
    }

    let on_submit = {
        let api = api.clone();
        let navigate = navigate.clone();
        let id = id.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();

            state.general_error.set(false);
            if !state.validate() {
                return;
            }
            let Some(dto) = state.snapshot().to_update_dto() else {
                return;
            };

            let api = api.clone();
            let navigate = navigate.clone();
            let id = id.clone();
            state.is_submitting.set(true);
            spawn_local(async move {
                match api.update_wine(&id, &dto).await {
                    Ok(()) => navigate(AppRoute::WineDetail { id: id.clone() }),
                    Err(_) => {
                        state.general_error.set(true);
                        state.is_submitting.set(false);
                    }
                }
            });
        }
    };

    let nav_back = navigate.clone();
    let back_id = id.clone();
    let nav_cancel = navigate.clone();
    let cancel_id = id.clone();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-3xl mx-auto space-y-8">
                <Header title="Edit wine" />

                <button
                    class="btn btn-ghost gap-2"
                    on:click=move |_| nav_back(AppRoute::WineDetail { id: back_id.clone() })
                >
                    <ArrowLeft attr:class="h-4 w-4" /> "Back to details"
                </button>

                <Show when=move || is_loading_wine.get()>
                    <div class="flex justify-center py-12">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                </Show>

                <Show when=move || load_error.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || load_error.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show when=move || !is_loading_wine.get() && load_error.get().is_none()>
                    <div class="card bg-base-100 shadow-xl">
                        <form class="card-body space-y-2" on:submit=on_submit.clone()>
                            <h2 class="card-title">"Edit bottle"</h2>

                            <Show when=move || state.general_error.get()>
                                <GeneralError />
                            </Show>

                            <WineFormFields state=state />

                            <div class="card-actions justify-end mt-4">
                                <button
                                    type="button"
                                    class="btn btn-ghost"
                                    on:click={
                                        let nav_cancel = nav_cancel.clone();
                                        let cancel_id = cancel_id.clone();
                                        move |_| nav_cancel(AppRoute::WineDetail { id: cancel_id.clone() })
                                    }
                                >
                                    "Cancel"
                                </button>
                                <button
                                    type="submit"
                                    class="btn btn-primary"
                                    disabled=move || state.is_submitting.get()
                                >
                                    {move || if state.is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                    } else {
                                        "Save changes".into_any()
                                    }}
                                </button>
                            </div>
                        </form>
                    </div>
                </Show>
            </div>
        </div>
    }
}
