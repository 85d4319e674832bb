//! 条码搜索页面
//!
//! 同一条码可能命中多条记录；查到 0 条是正常结果而非错误，
//! 并提供"带条码去添加"的快捷入口。传输层失败渲染为独立的
//! 连接错误状态。后发请求使先前未落定的响应失效 (last-requested-wins)。

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use bottle_tracker_shared::GetWineDTO;

use crate::api::{Api, ApiError};
use crate::components::header::Header;
use crate::components::icons::{Plus, Search};
use crate::components::rating_badge::RatingBadge;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

/// 搜索结果
///
/// `found` 区分"查到 0 条"与"查到若干条"；`error` 仅在传输层失败时出现。
#[derive(Debug, Clone, PartialEq)]
pub struct WineSearchResult {
    pub wines: Vec<GetWineDTO>,
    pub found: bool,
    pub error: Option<String>,
}

/// API 结果到展示状态的归类
pub(crate) fn classify_search(result: Result<Vec<GetWineDTO>, ApiError>) -> WineSearchResult {
    match result {
        Ok(wines) => WineSearchResult {
            found: !wines.is_empty(),
            wines,
            error: None,
        },
        Err(e) => WineSearchResult {
            wines: Vec::new(),
            found: false,
            error: Some(e.to_string()),
        },
    }
}

#[component]
pub fn WineSearchPage() -> impl IntoView {
    let api = expect_context::<Api>();
    let navigate = use_navigate();

    let (barcode, set_barcode) = signal(String::new());
    let (searched_barcode, set_searched_barcode) = signal(String::new());
    let (is_searching, set_is_searching) = signal(false);
    let (search_result, set_search_result) = signal(Option::<WineSearchResult>::None);
    // 请求序号：响应落定时若序号已前进，说明有更新的搜索在途，丢弃旧结果
    let request_seq = RwSignal::new(0u64);

    let on_submit = {
        let api = api.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();

            let code = barcode.get_untracked().trim().to_string();
            if code.is_empty() {
                return;
            }

            let seq = request_seq.get_untracked() + 1;
            request_seq.set(seq);
            set_searched_barcode.set(code.clone());
            set_search_result.set(None);
            set_is_searching.set(true);

            let api = api.clone();
            spawn_local(async move {
                let outcome = classify_search(api.search_wines_by_barcode(&code).await);
                if request_seq.get_untracked() != seq {
                    return;
                }
                set_search_result.set(Some(outcome));
                set_is_searching.set(false);
            });
        }
    };

    let nav_add = navigate.clone();
    let nav_row = navigate.clone();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-3xl mx-auto space-y-8">
                <Header title="Search" />

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_submit>
                        <h2 class="card-title">"Search by barcode"</h2>
                        <div class="join w-full">
                            <input
                                type="text"
                                inputmode="numeric"
                                placeholder="4001234567890"
                                on:input=move |ev| set_barcode.set(event_target_value(&ev))
                                prop:value=move || barcode.get()
                                class="input input-bordered join-item w-full"
                            />
                            <button
                                type="submit"
                                class="btn btn-primary join-item gap-2"
                                disabled=move || is_searching.get()
                            >
                                {move || if is_searching.get() {
                                    view! { <span class="loading loading-spinner loading-sm"></span> }.into_any()
                                } else {
                                    view! { <Search attr:class="h-4 w-4" /> }.into_any()
                                }}
                                "Search"
                            </button>
                        </div>
                    </form>
                </div>

                {move || {
                    search_result
                        .get()
                        .map(|result| {
                            if let Some(error) = result.error {
                                // 传输层失败：与"0 条匹配"严格区分
                                view! {
                                    <div class="card bg-base-100 shadow-xl">
                                        <div class="card-body items-center text-center">
                                            <h3 class="card-title text-error">"Connection Error"</h3>
                                            <p>{format!("Unable to search wines: {}", error)}</p>
                                            <p class="text-base-content/70 text-sm">
                                                "Please check your internet connection and try again."
                                            </p>
                                        </div>
                                    </div>
                                }
                                    .into_any()
                            } else if !result.found {
                                let nav_add = nav_add.clone();
                                view! {
                                    <div class="card bg-base-100 shadow-xl">
                                        <div class="card-body items-center text-center">
                                            <h3 class="card-title">"No wines found"</h3>
                                            <p class="text-base-content/70">
                                                "This barcode is not in your collection yet."
                                            </p>
                                            <div class="card-actions mt-2">
                                                <button
                                                    class="btn btn-primary gap-2"
                                                    on:click=move |_| nav_add(AppRoute::AddWine {
                                                        barcode: Some(searched_barcode.get_untracked()),
                                                    })
                                                >
                                                    <Plus attr:class="h-4 w-4" />
                                                    "Add a wine with this barcode"
                                                </button>
                                            </div>
                                        </div>
                                    </div>
                                }
                                    .into_any()
                            } else {
                                let nav_row = nav_row.clone();
                                view! {
                                    <div class="card bg-base-100 shadow-xl">
                                        <div class="card-body p-0">
                                            <div class="p-6 pb-2">
                                                <h3 class="card-title">
                                                    {format!("{} match(es)", result.wines.len())}
                                                </h3>
                                            </div>
                                            <div class="overflow-x-auto w-full">
                                                <table class="table w-full">
                                                    <tbody>
                                                        {result
                                                            .wines
                                                            .into_iter()
                                                            .map(|wine| {
                                                                let nav_row = nav_row.clone();
                                                                let id = wine.id.clone();
                                                                view! {
                                                                    <tr
                                                                        class="cursor-pointer hover"
                                                                        on:click=move |_| nav_row(AppRoute::WineDetail {
                                                                            id: id.clone(),
                                                                        })
                                                                    >
                                                                        <td class="font-bold">{wine.name}</td>
                                                                        <td>{wine.country}</td>
                                                                        <td>
                                                                            <RatingBadge rating=wine.rating />
                                                                        </td>
                                                                    </tr>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </tbody>
                                                </table>
                                            </div>
                                        </div>
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                }}
            </div>
        </div>
    }
}

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use bottle_tracker_shared::{WineRating, WineType};

    fn wine(id: &str) -> GetWineDTO {
        GetWineDTO {
            id: id.into(),
            name: "Rioja".into(),
            country: "Spain".into(),
            vintage_year: None,
            wine_type: WineType::Red,
            rating: WineRating::None,
            barcode: Some("111".into()),
        }
    }

    #[test]
    fn empty_match_list_is_not_an_error() {
        let result = classify_search(Ok(vec![]));
        assert_eq!(
            result,
            WineSearchResult {
                wines: vec![],
                found: false,
                error: None,
            }
        );
    }

    #[test]
    fn matches_are_found() {
        let result = classify_search(Ok(vec![wine("1"), wine("2")]));
        assert!(result.found);
        assert_eq!(result.wines.len(), 2);
        assert_eq!(result.error, None);
    }

    #[test]
    fn transport_failure_is_a_distinct_state() {
        let result = classify_search(Err(ApiError::Network("connection refused".into())));
        assert!(!result.found);
        assert!(result.wines.is_empty());
        assert_eq!(
            result.error.as_deref(),
            Some("Network error: connection refused")
        );
    }
}
