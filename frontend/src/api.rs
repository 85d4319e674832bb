//! API 客户端模块
//!
//! 每个远程操作一个方法，将 HTTP 状态码翻译为类型化的 [`ApiError`]，
//! 供表单控制器按变体映射到字段级/全局错误状态。
//! 认证接口在调用时从 [`TokenStore`] 现读 token，保证登出后立即生效。

use bottle_tracker_shared::{
    CreateWineDTO, ExternalWine, GetWineDTO, LoginUserRequest, LoginUserResponse,
    RegisterUserRequest, UpdateWineDTO,
};

use crate::session::TokenStore;
use crate::web::http::{HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::web::route::encode_component;
use crate::web::FetchHttpClient;

// =========================================================
// Base URL 解析
// =========================================================

const LOCAL_API_ORIGIN: &str = "http://localhost:8080";
const PRODUCTION_API_ORIGIN: &str = "https://bottle-tracker-go-api.up.railway.app";

/// 根据页面所在主机名决定 API 源：本地开发指向本地服务，其余指向生产
pub fn resolve_base_url(hostname: &str) -> &'static str {
    match hostname {
        "localhost" | "127.0.0.1" => LOCAL_API_ORIGIN,
        _ => PRODUCTION_API_ORIGIN,
    }
}

/// 读取 `window.location.hostname` 并解析 API 源
pub fn base_url_from_window() -> String {
    let hostname = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();
    resolve_base_url(&hostname).to_string()
}

// =========================================================
// 错误类型
// =========================================================

/// API 调用失败的类型化表示
///
/// 业务错误（409/401/404 语义）有独立变体，按状态码而非错误文案判定；
/// 其余非 2xx 折叠为 `Failed`，传输层问题折叠为 `Network`。
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 注册：用户名已存在 (409)
    UserAlreadyExists,
    /// 登录：凭据无效 (401)
    InvalidCredentials,
    /// 个人酒藏中无此记录 (404)
    WineNotFound,
    /// 外部目录中无此条码 (404)
    ExternalWineNotFound,
    /// 其他非 2xx 响应，携带操作名与 HTTP 状态文本
    Failed {
        what: &'static str,
        status_text: String,
    },
    /// 传输层失败（fetch 被拒绝、无网络）
    Network(String),
    /// 响应体解析失败
    Parse(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::UserAlreadyExists => write!(f, "User already exists"),
            ApiError::InvalidCredentials => write!(f, "Invalid credentials"),
            ApiError::WineNotFound => write!(f, "Wine not found"),
            ApiError::ExternalWineNotFound => {
                write!(f, "Wine not found in external database")
            }
            ApiError::Failed { what, status_text } => write!(f, "{}: {}", what, status_text),
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Parse(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::ResponseParseFailed(msg) => ApiError::Parse(msg),
            HttpError::RequestBuildFailed(msg) | HttpError::NetworkError(msg) => {
                ApiError::Network(msg)
            }
        }
    }
}

// =========================================================
// 客户端
// =========================================================

/// Bottle Tracker API 客户端
///
/// 泛型于 [`HttpClient`]，生产环境使用 fetch，测试注入 Mock。
#[derive(Debug, Clone)]
pub struct BottleApi<C: HttpClient> {
    base_url: String,
    client: C,
    tokens: TokenStore,
}

/// 生产环境的具体客户端类型（通过 Context 注入组件）
pub type Api = BottleApi<FetchHttpClient>;

impl BottleApi<FetchHttpClient> {
    /// 依据运行环境创建生产客户端
    pub fn from_window(tokens: TokenStore) -> Self {
        Self::new(base_url_from_window(), FetchHttpClient, tokens)
    }
}

impl<C: HttpClient> BottleApi<C> {
    pub fn new(base_url: impl Into<String>, client: C, tokens: TokenStore) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client,
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 未认证请求的公共头
    fn request(&self, path: &str, method: HttpMethod) -> HttpRequest {
        HttpRequest::new(&self.url(path), method).with_header("Content-Type", "application/json")
    }

    /// 认证请求：token 在调用时现读，而非构造时缓存
    fn authed_request(&self, path: &str, method: HttpMethod) -> HttpRequest {
        let token = self.tokens.get().unwrap_or_default();
        self.request(path, method)
            .with_header("Authorization", &format!("Bearer {}", token))
    }

    // ---- 用户 ----

    /// 注册用户；服务端返回 201 无响应体
    pub async fn register_user(&self, user: &RegisterUserRequest) -> Result<(), ApiError> {
        let req = self
            .request("/users/register", HttpMethod::Post)
            .with_json(user)?;
        let res = self.client.send(req).await?;

        if res.status == 409 {
            return Err(ApiError::UserAlreadyExists);
        }
        if !res.ok() {
            return Err(ApiError::Failed {
                what: "Registration failed",
                status_text: res.status_text,
            });
        }
        Ok(())
    }

    /// 登录，成功时返回带 token 的响应
    pub async fn login_user(&self, user: &LoginUserRequest) -> Result<LoginUserResponse, ApiError> {
        let req = self
            .request("/users/login", HttpMethod::Post)
            .with_json(user)?;
        let res = self.client.send(req).await?;

        if res.status == 401 {
            return Err(ApiError::InvalidCredentials);
        }
        if !res.ok() {
            return Err(ApiError::Failed {
                what: "Login failed",
                status_text: res.status_text,
            });
        }
        Ok(res.json()?)
    }

    /// 校验当前 token 是否仍被服务端接受；只探测新鲜度，不取数据
    pub async fn validate_token(&self) -> Result<(), ApiError> {
        let req = self.authed_request("/users/validate", HttpMethod::Get);
        let res = self.client.send(req).await?;

        if !res.ok() {
            return Err(ApiError::Failed {
                what: "Session validation failed",
                status_text: res.status_text,
            });
        }
        Ok(())
    }

    // ---- 个人酒藏 ----

    /// 当前用户的全部葡萄酒
    pub async fn get_all_wines(&self) -> Result<Vec<GetWineDTO>, ApiError> {
        let req = self.authed_request("/wines", HttpMethod::Get);
        let res = self.client.send(req).await?;

        if !res.ok() {
            return Err(ApiError::Failed {
                what: "Failed to fetch wines",
                status_text: res.status_text,
            });
        }
        Ok(res.json()?)
    }

    pub async fn get_wine_by_id(&self, id: &str) -> Result<GetWineDTO, ApiError> {
        let path = format!("/wines/{}", encode_component(id));
        let req = self.authed_request(&path, HttpMethod::Get);
        let res = self.client.send(req).await?;

        if res.status == 404 {
            return Err(ApiError::WineNotFound);
        }
        if !res.ok() {
            return Err(ApiError::Failed {
                what: "Failed to fetch wine",
                status_text: res.status_text,
            });
        }
        Ok(res.json()?)
    }

    /// 创建记录；服务端返回 201 无响应体
    pub async fn create_wine(&self, wine: &CreateWineDTO) -> Result<(), ApiError> {
        let req = self
            .authed_request("/wines", HttpMethod::Post)
            .with_json(wine)?;
        let res = self.client.send(req).await?;

        if !res.ok() {
            return Err(ApiError::Failed {
                what: "Failed to create wine",
                status_text: res.status_text,
            });
        }
        Ok(())
    }

    /// 全量更新；不做局部 diff
    pub async fn update_wine(&self, id: &str, wine: &UpdateWineDTO) -> Result<(), ApiError> {
        let path = format!("/wines/{}", encode_component(id));
        let req = self
            .authed_request(&path, HttpMethod::Put)
            .with_json(wine)?;
        let res = self.client.send(req).await?;

        if !res.ok() {
            return Err(ApiError::Failed {
                what: "Failed to update wine",
                status_text: res.status_text,
            });
        }
        Ok(())
    }

    pub async fn delete_wine(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/wines/{}", encode_component(id));
        let req = self.authed_request(&path, HttpMethod::Delete);
        let res = self.client.send(req).await?;

        if !res.ok() {
            return Err(ApiError::Failed {
                what: "Failed to delete wine",
                status_text: res.status_text,
            });
        }
        Ok(())
    }

    /// 条码检索；同一条码可能对应多条记录，返回 0..n 个匹配
    pub async fn search_wines_by_barcode(
        &self,
        barcode: &str,
    ) -> Result<Vec<GetWineDTO>, ApiError> {
        let path = format!("/wines/barcode/{}", encode_component(barcode));
        let req = self.authed_request(&path, HttpMethod::Get);
        let res = self.client.send(req).await?;

        if !res.ok() {
            return Err(ApiError::Failed {
                what: "Wine search failed",
                status_text: res.status_text,
            });
        }
        Ok(res.json()?)
    }

    // ---- 外部目录 ----

    /// 外部条码目录查询；无需认证，404 表示目录中不存在
    pub async fn get_external_wine_by_barcode(
        &self,
        barcode: &str,
    ) -> Result<ExternalWine, ApiError> {
        let path = format!("/wines/external/barcode/{}", encode_component(barcode));
        let req = self.request(&path, HttpMethod::Get);
        let res = self.client.send(req).await?;

        if res.status == 404 {
            return Err(ApiError::ExternalWineNotFound);
        }
        if !res.ok() {
            return Err(ApiError::Failed {
                what: "External wine search failed",
                status_text: res.status_text,
            });
        }
        Ok(res.json()?)
    }
}

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::http::MockHttpClient;
    use bottle_tracker_shared::{WineRating, WineType};
    use serde_json::json;

    const BASE: &str = "http://localhost:8080";

    fn api(client: MockHttpClient) -> BottleApi<MockHttpClient> {
        let tokens = TokenStore::new();
        tokens.remove();
        BottleApi::new(BASE, client, tokens)
    }

    #[tokio::test]
    async fn register_sends_name_and_password() {
        let client = MockHttpClient::new();
        client.mock_status("http://localhost:8080/users/register", 201);
        let api = api(client);

        let result = api
            .register_user(&RegisterUserRequest {
                name: "JohnDoe".into(),
                password: "password123".into(),
            })
            .await;
        assert!(result.is_ok());

        let req = api.client.last_request();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"name": "JohnDoe", "password": "password123"})
        );
    }

    #[tokio::test]
    async fn register_conflict_maps_to_user_already_exists() {
        let client = MockHttpClient::new();
        client.mock_status("http://localhost:8080/users/register", 409);
        let api = api(client);

        let result = api
            .register_user(&RegisterUserRequest {
                name: "JohnDoe".into(),
                password: "password123".into(),
            })
            .await;
        assert_eq!(result, Err(ApiError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn login_maps_status_codes() {
        let client = MockHttpClient::new();
        client.mock_status("http://localhost:8080/users/login", 401);
        let api = api(client);
        let credentials = LoginUserRequest {
            name: "JohnDoe".into(),
            password: "wrong".into(),
        };

        assert_eq!(
            api.login_user(&credentials).await,
            Err(ApiError::InvalidCredentials)
        );

        api.client
            .mock_status("http://localhost:8080/users/login", 500);
        let err = api.login_user(&credentials).await.unwrap_err();
        assert_eq!(err.to_string(), "Login failed: Internal Server Error");

        api.client.mock_response(
            "http://localhost:8080/users/login",
            200,
            json!({"token": "abc.def.ghi"}),
        );
        let response = api.login_user(&credentials).await.unwrap();
        assert_eq!(response.token, "abc.def.ghi");
    }

    #[tokio::test]
    async fn authenticated_calls_attach_fresh_bearer_token() {
        let client = MockHttpClient::new();
        client.mock_response("http://localhost:8080/wines", 200, json!([]));
        let api = api(client);
        api.tokens.set("token-1");

        api.get_all_wines().await.unwrap();
        assert_eq!(
            api.client.last_request().headers.get("Authorization"),
            Some(&"Bearer token-1".to_string())
        );

        // token 更换后下一次调用立即携带新值
        api.tokens.set("token-2");
        api.get_all_wines().await.unwrap();
        assert_eq!(
            api.client.last_request().headers.get("Authorization"),
            Some(&"Bearer token-2".to_string())
        );
    }

    #[tokio::test]
    async fn get_wine_distinguishes_not_found() {
        let client = MockHttpClient::new();
        client.mock_status("http://localhost:8080/wines/42", 404);
        let api = api(client);

        assert_eq!(
            api.get_wine_by_id("42").await,
            Err(ApiError::WineNotFound)
        );

        api.client.mock_response(
            "http://localhost:8080/wines/42",
            200,
            json!({
                "id": "42",
                "name": "Bordeaux Rouge",
                "country": "France",
                "type": "RED",
                "rating": "NONE",
            }),
        );
        let wine = api.get_wine_by_id("42").await.unwrap();
        assert_eq!(wine.wine_type, WineType::Red);
        assert_eq!(wine.rating, WineRating::None);
        assert_eq!(wine.vintage_year, None);
    }

    #[tokio::test]
    async fn search_returns_empty_match_list_without_error() {
        let client = MockHttpClient::new();
        client.mock_response(
            "http://localhost:8080/wines/barcode/4001234567890",
            200,
            json!([]),
        );
        let api = api(client);

        let wines = api.search_wines_by_barcode("4001234567890").await.unwrap();
        assert!(wines.is_empty());
    }

    #[tokio::test]
    async fn external_lookup_is_unauthenticated_and_maps_404() {
        let client = MockHttpClient::new();
        client.mock_response(
            "http://localhost:8080/wines/external/barcode/111",
            200,
            json!({
                "name": "Rioja",
                "country": "Spain",
                "type": "red wine",
                "price": 9.99,
                "volume": 750.0,
            }),
        );
        let api = api(client);

        let wine = api.get_external_wine_by_barcode("111").await.unwrap();
        assert_eq!(wine.name, "Rioja");
        assert!(
            !api.client
                .last_request()
                .headers
                .contains_key("Authorization")
        );

        api.client
            .mock_status("http://localhost:8080/wines/external/barcode/111", 404);
        assert_eq!(
            api.get_external_wine_by_barcode("111").await,
            Err(ApiError::ExternalWineNotFound)
        );
    }

    #[tokio::test]
    async fn transport_failure_maps_to_network_error() {
        let client = MockHttpClient::new();
        client.fail_with("connection refused");
        let api = api(client);

        match api.get_all_wines().await {
            Err(ApiError::Network(msg)) => assert_eq!(msg, "connection refused"),
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[test]
    fn base_url_follows_hostname() {
        assert_eq!(resolve_base_url("localhost"), LOCAL_API_ORIGIN);
        assert_eq!(resolve_base_url("127.0.0.1"), LOCAL_API_ORIGIN);
        assert_eq!(
            resolve_base_url("bottles.example.com"),
            PRODUCTION_API_ORIGIN
        );
    }
}
