//! 葡萄酒表单字段组件
//!
//! 添加/编辑页共用的输入区。纯渲染，所有规则在 `form_state` 中。

use bottle_tracker_shared::{WineRating, WineType};
use leptos::prelude::*;

mod form_state;

pub use form_state::{WineFormDraft, WineFormErrors, WineFormState};

/// 字段错误提示
fn field_error(error: Option<String>) -> impl IntoView {
    error.map(|msg| {
        view! {
            <label class="label">
                <span class="label-text-alt text-error">{msg}</span>
            </label>
        }
    })
}

/// 葡萄酒表单字段组
#[component]
pub fn WineFormFields(state: WineFormState) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for="name" class="label">
                <span class="label-text">"Name"</span>
            </label>
            <input
                id="name"
                type="text"
                placeholder="Bordeaux Rouge"
                on:input=move |ev| state.set_name(event_target_value(&ev))
                prop:value=move || state.name.get()
                class="input input-bordered w-full"
            />
            {move || field_error(state.errors.get().name)}
        </div>

        <div class="form-control">
            <label for="country" class="label">
                <span class="label-text">"Country"</span>
            </label>
            <input
                id="country"
                type="text"
                placeholder="France"
                on:input=move |ev| state.set_country(event_target_value(&ev))
                prop:value=move || state.country.get()
                class="input input-bordered w-full"
            />
            {move || field_error(state.errors.get().country)}
        </div>

        <div class="grid grid-cols-2 gap-4">
            <div class="form-control">
                <label for="wine_type" class="label">
                    <span class="label-text">"Type"</span>
                </label>
                <select
                    id="wine_type"
                    class="select select-bordered w-full"
                    on:change=move |ev| {
                        state.set_wine_type(WineType::from_form_value(&event_target_value(&ev)))
                    }
                >
                    <option value="" selected=move || state.wine_type.get().is_none()>
                        "Select a type"
                    </option>
                    {WineType::ALL
                        .into_iter()
                        .map(|t| {
                            view! {
                                <option
                                    value=t.as_str()
                                    selected=move || state.wine_type.get() == Some(t)
                                >
                                    {t.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                {move || field_error(state.errors.get().wine_type)}
            </div>

            <div class="form-control">
                <label for="vintage_year" class="label">
                    <span class="label-text">"Vintage year (optional)"</span>
                </label>
                <input
                    id="vintage_year"
                    type="text"
                    inputmode="numeric"
                    placeholder="2020"
                    on:input=move |ev| state.set_vintage_year(event_target_value(&ev))
                    prop:value=move || state.vintage_year.get()
                    class="input input-bordered w-full"
                />
                {move || field_error(state.errors.get().vintage_year)}
            </div>
        </div>

        <div class="form-control">
            <label for="rating" class="label">
                <span class="label-text">"Rating"</span>
            </label>
            <select
                id="rating"
                class="select select-bordered w-full"
                on:change=move |ev| {
                    if let Some(rating) = WineRating::from_form_value(&event_target_value(&ev)) {
                        state.set_rating(rating);
                    }
                }
            >
                {WineRating::ALL
                    .into_iter()
                    .map(|r| {
                        view! {
                            <option value=r.as_str() selected=move || state.rating.get() == r>
                                {r.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>

        <div class="form-control">
            <label for="barcode" class="label">
                <span class="label-text">"Barcode (optional)"</span>
            </label>
            <input
                id="barcode"
                type="text"
                inputmode="numeric"
                placeholder="4001234567890"
                on:input=move |ev| state.set_barcode(event_target_value(&ev))
                prop:value=move || state.barcode.get()
                class="input input-bordered w-full"
            />
        </div>
    }
}
