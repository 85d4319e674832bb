//! 添加葡萄酒页面
//!
//! 带条码进入时（扫码或搜索页跳转）自动向外部目录查询一次：
//! 命中则预填名称与国家——但从不覆盖类型，外部目录的类型词表
//! 与内部枚举并不对应；未命中只提示，不阻塞手动录入。

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use bottle_tracker_shared::ExternalWine;

use crate::api::Api;
use crate::components::general_error::GeneralError;
use crate::components::header::Header;
use crate::components::wine_form::{WineFormFields, WineFormState};
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

/// 外部目录查询结果
///
/// `found: false` 表示目录无此条码或查询失败，两者都不算错误状态。
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalWineSearchResult {
    pub wine: Option<ExternalWine>,
    pub found: bool,
}

#[component]
pub fn AddWinePage(
    /// 进入页面时已知的条码（来自扫码或搜索页）
    #[prop(optional)]
    barcode: Option<String>,
) -> impl IntoView {
    let api = expect_context::<Api>();
    let navigate = use_navigate();

    let state = WineFormState::new();
    let (external_result, set_external_result) = signal(Option::<ExternalWineSearchResult>::None);
    let (is_loading_external, set_is_loading_external) = signal(false);

    // 条码已知时自动查询外部目录，仅在挂载时触发一次
    if let Some(code) = barcode.filter(|c| !c.trim().is_empty()) {
        state.barcode.set(code.clone());
        let api = api.clone();
        set_is_loading_external.set(true);
        spawn_local(async move {
            match api.get_external_wine_by_barcode(&code).await {
                Ok(wine) => {
                    if !wine.name.is_empty() {
                        state.name.set(wine.name.clone());
                    }
                    if !wine.country.is_empty() {
                        state.country.set(wine.country.clone());
                    }
                    set_external_result.set(Some(ExternalWineSearchResult {
                        wine: Some(wine),
                        found: true,
                    }));
                }
                Err(_) => {
                    set_external_result.set(Some(ExternalWineSearchResult {
                        wine: None,
                        found: false,
                    }));
                }
            }
            set_is_loading_external.set(false);
        });
    }

    let on_submit = {
        let api = api.clone();
        let navigate = navigate.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();

            state.general_error.set(false);
            if !state.validate() {
                return;
            }
            let Some(dto) = state.snapshot().to_create_dto() else {
                return;
            };

            let api = api.clone();
            let navigate = navigate.clone();
            state.is_submitting.set(true);
            spawn_local(async move {
                match api.create_wine(&dto).await {
                    Ok(()) => navigate(AppRoute::Wines),
                    Err(_) => {
                        state.general_error.set(true);
                        state.is_submitting.set(false);
                    }
                }
            });
        }
    };

    let nav_cancel = navigate.clone();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-3xl mx-auto space-y-8">
                <Header title="Add wine" />

                <Show when=move || is_loading_external.get()>
                    <div class="alert">
                        <span class="loading loading-spinner loading-sm"></span>
                        <span>"Looking up barcode in the external database..."</span>
                    </div>
                </Show>

                {move || {
                    external_result
                        .get()
                        .map(|result| {
                            if result.found {
                                let summary = result
                                    .wine
                                    .map(|w| format!("{} ({})", w.name, w.country))
                                    .unwrap_or_default();
                                view! {
                                    <div class="alert alert-success text-sm py-2">
                                        <span>
                                            {format!("Found in external database: {}. Details prefilled.", summary)}
                                        </span>
                                    </div>
                                }
                                    .into_any()
                            } else {
                                view! {
                                    <div class="alert alert-warning text-sm py-2">
                                        <span>
                                            "Barcode not found in the external database. Enter the details manually."
                                        </span>
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                }}

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body space-y-2" on:submit=on_submit>
                        <h2 class="card-title">"New bottle"</h2>

                        <Show when=move || state.general_error.get()>
                            <GeneralError />
                        </Show>

                        <WineFormFields state=state />

                        <div class="card-actions justify-end mt-4">
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| nav_cancel(AppRoute::Wines)
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
                                    "Add to collection".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
