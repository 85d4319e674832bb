//! 登录页面
//!
//! 凭据错误按状态码判定（401 -> 密码字段错误），其余失败走全局错误，
//! 不做错误文案嗅探。成功后写入 token 并翻转认证状态，
//! 导航由路由服务的认证状态监听自动完成。

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use bottle_tracker_shared::LoginUserRequest;

use crate::api::{Api, ApiError};
use crate::auth::{store_login, use_auth};
use crate::components::general_error::GeneralError;
use crate::components::icons::Wine;
use crate::session::TokenStore;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

// =========================================================
// 表单状态
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginFormErrors {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl LoginFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.password.is_none()
    }
}

/// 字段值的纯数据快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginFormDraft {
    pub name: String,
    pub password: String,
}

impl LoginFormDraft {
    pub fn validate(&self) -> LoginFormErrors {
        let mut errors = LoginFormErrors::default();

        if self.name.trim().is_empty() {
            errors.name = Some("Name is required".to_string());
        }

        if self.password.is_empty() {
            errors.password = Some("Password is required".to_string());
        }

        errors
    }

    pub fn to_request(&self) -> LoginUserRequest {
        LoginUserRequest {
            name: self.name.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub name: RwSignal<String>,
    pub password: RwSignal<String>,
    pub errors: RwSignal<LoginFormErrors>,
    pub general_error: RwSignal<bool>,
    pub is_submitting: RwSignal<bool>,
}

impl LoginFormState {
    /// `prefill_username` 来自注册成功页跳转的 query 参数
    pub fn new(prefill_username: Option<String>) -> Self {
        Self {
            name: RwSignal::new(prefill_username.unwrap_or_default()),
            password: RwSignal::new(String::new()),
            errors: RwSignal::new(LoginFormErrors::default()),
            general_error: RwSignal::new(false),
            is_submitting: RwSignal::new(false),
        }
    }

    pub fn set_name(&self, value: String) {
        self.name.set(value);
        self.errors.update(|e| e.name = None);
        self.general_error.set(false);
    }

    pub fn set_password(&self, value: String) {
        self.password.set(value);
        self.errors.update(|e| e.password = None);
        self.general_error.set(false);
    }

    pub fn snapshot(&self) -> LoginFormDraft {
        LoginFormDraft {
            name: self.name.get_untracked(),
            password: self.password.get_untracked(),
        }
    }

    pub fn validate(&self) -> bool {
        let errors = self.snapshot().validate();
        let valid = errors.is_empty();
        self.errors.set(errors);
        valid
    }

    /// 提交失败映射：凭据错误落到密码字段，其余走全局错误
    pub fn apply_submit_error(&self, error: &ApiError) {
        match error {
            ApiError::InvalidCredentials => {
                self.errors
                    .update(|e| e.password = Some("Invalid username or password".to_string()));
            }
            _ => self.general_error.set(true),
        }
    }
}

// =========================================================
// 页面组件
// =========================================================

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

#[component]
pub fn LoginPage(
    /// 注册成功后跳转携带的用户名预填
    #[prop(optional)]
    username: Option<String>,
) -> impl IntoView {
    let auth = use_auth();
    let tokens = use_context::<TokenStore>().unwrap_or_default();
    let api = expect_context::<Api>();
    let navigate = use_navigate();

    let state = LoginFormState::new(username);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        state.general_error.set(false);
        if !state.validate() {
            return;
        }

        let request = state.snapshot().to_request();
        let api = api.clone();
        state.is_submitting.set(true);
        spawn_local(async move {
            match api.login_user(&request).await {
                Ok(response) => {
                    // 路由服务监听到认证状态变化后自动跳转到酒藏页
                    store_login(&auth, tokens, &response.token);
                }
                Err(e) => state.apply_submit_error(&e),
            }
            state.is_submitting.set(false);
        });
    };

    let nav_register = navigate.clone();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Wine attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Bottle Tracker"</h1>
                        <p class="text-base-content/70">"Log in to manage your wine collection"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || state.general_error.get()>
                            <GeneralError />
                        </Show>

                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Name"</span>
                            </label>
                            <input
                                id="name"
                                type="text"
                                placeholder="JohnDoe"
                                on:input=move |ev| state.set_name(event_target_value(&ev))
                                prop:value=move || state.name.get()
                                class="input input-bordered"
                            />
                            {move || field_error(state.errors.get().name)}
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| state.set_password(event_target_value(&ev))
                                prop:value=move || state.password.get()
                                class="input input-bordered"
                            />
                            {move || field_error(state.errors.get().password)}
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || state.is_submitting.get()>
                                {move || if state.is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                                } else {
                                    "Log in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "No account yet? "
                            <a class="link link-primary" on:click=move |_| nav_register(AppRoute::Register)>
                                "Register"
                            </a>
                        </p>
                    </form>
                </div>
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

    #[test]
    fn requires_name_and_password() {
        let errors = LoginFormDraft::default().validate();
        assert_eq!(errors.name.as_deref(), Some("Name is required"));
        assert_eq!(errors.password.as_deref(), Some("Password is required"));

        let errors = LoginFormDraft {
            name: "   ".into(),
            password: "secret".into(),
        }
        .validate();
        assert_eq!(errors.name.as_deref(), Some("Name is required"));
        assert!(errors.password.is_none());
    }

    #[test]
    fn request_trims_name_but_not_password() {
        let request = LoginFormDraft {
            name: " JohnDoe ".into(),
            password: " secret ".into(),
        }
        .to_request();
        assert_eq!(request.name, "JohnDoe");
        assert_eq!(request.password, " secret ");
    }

    #[test]
    fn field_change_clears_field_and_general_error() {
        let state = LoginFormState::new(None);
        assert!(!state.validate());
        state.general_error.set(true);

        state.set_name("JohnDoe".into());
        let errors = state.errors.get_untracked();
        assert!(errors.name.is_none());
        // 其他字段错误保持不变
        assert!(errors.password.is_some());
        assert!(!state.general_error.get_untracked());
    }

    #[test]
    fn invalid_credentials_map_to_password_field() {
        let state = LoginFormState::new(None);
        state.apply_submit_error(&ApiError::InvalidCredentials);
        assert_eq!(
            state.errors.get_untracked().password.as_deref(),
            Some("Invalid username or password")
        );
        assert!(!state.general_error.get_untracked());
    }

    #[test]
    fn unexpected_failures_map_to_general_error() {
        let state = LoginFormState::new(None);
        state.apply_submit_error(&ApiError::Failed {
            what: "Login failed",
            status_text: "Internal Server Error".into(),
        });
        assert!(state.general_error.get_untracked());
        assert!(state.errors.get_untracked().password.is_none());

        state.general_error.set(false);
        state.apply_submit_error(&ApiError::Network("offline".into()));
        assert!(state.general_error.get_untracked());
    }

    #[test]
    fn username_prefill_from_registration() {
        let state = LoginFormState::new(Some("JohnDoe".into()));
        assert_eq!(state.name.get_untracked(), "JohnDoe");
    }
}
