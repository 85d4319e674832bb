//! 注册页面
//!
//! 成功后不跳转，而是原地切换为确认视图，并提供携带用户名的登录入口。
//! 409 冲突映射为用户名字段错误，其余失败走全局错误。

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use bottle_tracker_shared::RegisterUserRequest;

use crate::api::{Api, ApiError};
use crate::components::general_error::GeneralError;
use crate::components::icons::Wine;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

// =========================================================
// 表单状态
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterFormErrors {
    pub name: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl RegisterFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.password.is_none() && self.confirm_password.is_none()
    }
}

/// 字段值的纯数据快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterFormDraft {
    pub name: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterFormDraft {
    pub fn validate(&self) -> RegisterFormErrors {
        let mut errors = RegisterFormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.name = Some("Name is required".to_string());
        } else if name.chars().count() < 2 {
            errors.name = Some("Name must be at least 2 characters".to_string());
        }

        if self.password.is_empty() {
            errors.password = Some("Password is required".to_string());
        } else if self.password.chars().count() < 6 {
            errors.password = Some("Password must be at least 6 characters".to_string());
        }

        if self.confirm_password.is_empty() {
            errors.confirm_password = Some("Please confirm your password".to_string());
        } else if self.password != self.confirm_password {
            errors.confirm_password = Some("Passwords do not match".to_string());
        }

        errors
    }

    /// 确认密码只做本地校验，不随请求发送
    pub fn to_request(&self) -> RegisterUserRequest {
        RegisterUserRequest {
            name: self.name.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct RegisterFormState {
    pub name: RwSignal<String>,
    pub password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
    pub errors: RwSignal<RegisterFormErrors>,
    pub general_error: RwSignal<bool>,
    pub is_submitting: RwSignal<bool>,
    /// 注册完成，切换到确认视图
    pub is_success: RwSignal<bool>,
    pub registered_username: RwSignal<Option<String>>,
}

impl RegisterFormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            confirm_password: RwSignal::new(String::new()),
            errors: RwSignal::new(RegisterFormErrors::default()),
            general_error: RwSignal::new(false),
            is_submitting: RwSignal::new(false),
            is_success: RwSignal::new(false),
            registered_username: RwSignal::new(None),
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

    pub fn set_confirm_password(&self, value: String) {
        self.confirm_password.set(value);
        self.errors.update(|e| e.confirm_password = None);
        self.general_error.set(false);
    }

    pub fn snapshot(&self) -> RegisterFormDraft {
        RegisterFormDraft {
            name: self.name.get_untracked(),
            password: self.password.get_untracked(),
            confirm_password: self.confirm_password.get_untracked(),
        }
    }

    pub fn validate(&self) -> bool {
        let errors = self.snapshot().validate();
        let valid = errors.is_empty();
        self.errors.set(errors);
        valid
    }

    /// 提交失败映射：重名冲突落到用户名字段，其余走全局错误
    pub fn apply_submit_error(&self, error: &ApiError) {
        match error {
            ApiError::UserAlreadyExists => {
                self.errors.update(|e| {
                    e.name = Some("A user with this name already exists".to_string())
                });
            }
            _ => self.general_error.set(true),
        }
    }

    pub fn mark_success(&self, username: &str) {
        self.is_success.set(true);
        self.registered_username.set(Some(username.to_string()));
    }
}

impl Default for RegisterFormState {
    fn default() -> Self {
        Self::new()
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
pub fn RegisterPage() -> impl IntoView {
    let api = expect_context::<Api>();
    let navigate = use_navigate();

    let state = RegisterFormState::new();

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
            match api.register_user(&request).await {
                Ok(()) => state.mark_success(&request.name),
                Err(e) => state.apply_submit_error(&e),
            }
            state.is_submitting.set(false);
        });
    };

    let nav_login = navigate.clone();
    let nav_success_login = navigate.clone();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <Show
                    when=move || !state.is_success.get()
                    fallback=move || {
                        let nav_success_login = nav_success_login.clone();
                        let username = move || state.registered_username.get().unwrap_or_default();
                        view! {
                            <div class="card w-full shadow-2xl bg-base-100">
                                <div class="card-body items-center text-center">
                                    <h2 class="card-title text-success">"Registration successful!"</h2>
                                    <p>{move || format!("Welcome to Bottle Tracker, {}!", username())}</p>
                                    <div class="card-actions mt-4">
                                        <button
                                            class="btn btn-primary"
                                            on:click=move |_| nav_success_login(AppRoute::Login {
                                                username: state.registered_username.get_untracked(),
                                            })
                                        >
                                            "Continue to login"
                                        </button>
                                    </div>
                                </div>
                            </div>
                        }
                    }
                >
                    <div class="text-center mb-4">
                        <div class="flex flex-col items-center gap-2">
                            <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                                <Wine attr:class="h-8 w-8" />
                            </div>
                            <h1 class="text-3xl font-bold">"Create your account"</h1>
                            <p class="text-base-content/70">"Start tracking your bottles"</p>
                        </div>
                    </div>

                    <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                        <form class="card-body" on:submit=on_submit.clone()>
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
                            <div class="form-control">
                                <label class="label" for="confirm_password">
                                    <span class="label-text">"Confirm password"</span>
                                </label>
                                <input
                                    id="confirm_password"
                                    type="password"
                                    placeholder="••••••••"
                                    on:input=move |ev| state.set_confirm_password(event_target_value(&ev))
                                    prop:value=move || state.confirm_password.get()
                                    class="input input-bordered"
                                />
                                {move || field_error(state.errors.get().confirm_password)}
                            </div>
                            <div class="form-control mt-6">
                                <button class="btn btn-primary" disabled=move || state.is_submitting.get()>
                                    {move || if state.is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Registering..." }.into_any()
                                    } else {
                                        "Register".into_any()
                                    }}
                                </button>
                            </div>
                            <p class="text-center text-sm mt-2">
                                "Already have an account? "
                                <a class="link link-primary" on:click={
                                    let nav_login = nav_login.clone();
                                    move |_| nav_login(AppRoute::Login { username: None })
                                }>
                                    "Log in"
                                </a>
                            </p>
                        </form>
                    </div>
                </Show>
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

    fn valid_draft() -> RegisterFormDraft {
        RegisterFormDraft {
            name: "JohnDoe".into(),
            password: "password123".into(),
            confirm_password: "password123".into(),
        }
    }

    #[test]
    fn validates_name_rules() {
        let mut draft = valid_draft();

        draft.name = "".into();
        assert_eq!(draft.validate().name.as_deref(), Some("Name is required"));

        // 空白串 trim 后按缺失处理
        draft.name = "   ".into();
        assert_eq!(draft.validate().name.as_deref(), Some("Name is required"));

        draft.name = "A".into();
        assert_eq!(
            draft.validate().name.as_deref(),
            Some("Name must be at least 2 characters")
        );

        draft.name = "Jo".into();
        assert!(draft.validate().name.is_none());
    }

    #[test]
    fn validates_password_rules() {
        let mut draft = valid_draft();

        draft.password = "".into();
        draft.confirm_password = "".into();
        let errors = draft.validate();
        assert_eq!(errors.password.as_deref(), Some("Password is required"));
        assert_eq!(
            errors.confirm_password.as_deref(),
            Some("Please confirm your password")
        );

        draft.password = "12345".into();
        draft.confirm_password = "12345".into();
        assert_eq!(
            draft.validate().password.as_deref(),
            Some("Password must be at least 6 characters")
        );

        draft.password = "password123".into();
        draft.confirm_password = "different123".into();
        assert_eq!(
            draft.validate().confirm_password.as_deref(),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn valid_draft_passes_and_builds_request() {
        let draft = RegisterFormDraft {
            name: " JohnDoe ".into(),
            ..valid_draft()
        };
        assert!(draft.validate().is_empty());

        let request = draft.to_request();
        assert_eq!(request.name, "JohnDoe");
        assert_eq!(request.password, "password123");
    }

    #[test]
    fn validation_is_idempotent() {
        let draft = RegisterFormDraft {
            name: "A".into(),
            ..Default::default()
        };
        assert_eq!(draft.validate(), draft.validate());
    }

    #[test]
    fn field_change_clears_only_that_error() {
        let state = RegisterFormState::new();
        assert!(!state.validate());

        state.set_name("JohnDoe".into());
        let errors = state.errors.get_untracked();
        assert!(errors.name.is_none());
        assert!(errors.password.is_some());
        assert!(errors.confirm_password.is_some());
    }

    #[test]
    fn conflict_maps_to_name_field_error() {
        let state = RegisterFormState::new();
        state.apply_submit_error(&ApiError::UserAlreadyExists);
        assert_eq!(
            state.errors.get_untracked().name.as_deref(),
            Some("A user with this name already exists")
        );
        assert!(!state.general_error.get_untracked());
    }

    #[test]
    fn unexpected_failure_maps_to_general_error() {
        let state = RegisterFormState::new();
        state.apply_submit_error(&ApiError::Network("offline".into()));
        assert!(state.general_error.get_untracked());
        assert!(state.errors.get_untracked().name.is_none());
    }

    #[test]
    fn success_records_registered_username() {
        let state = RegisterFormState::new();
        state.mark_success("JohnDoe");
        assert!(state.is_success.get_untracked());
        assert_eq!(
            state.registered_username.get_untracked().as_deref(),
            Some("JohnDoe")
        );
    }
}
