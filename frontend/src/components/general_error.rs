//! 全局错误提示组件
//!
//! 非字段特定的提交失败（5xx、网络故障、响应畸形）统一展示为此条，
//! 不给出字段级指引，用户可直接重试。

use leptos::prelude::*;

#[component]
pub fn GeneralError() -> impl IntoView {
    view! {
        <div role="alert" class="alert alert-error text-sm py-2">
            <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 9v2m0 4h.01m-6.938 4h13.856c1.54 0 2.502-1.667 1.732-3L13.732 4c-.77-1.333-2.694-1.333-3.464 0L3.34 16c-.77 1.333.192 3 1.732 3z" /></svg>
            <span>"A technical error occurred. Please try again."</span>
        </div>
    }
}
