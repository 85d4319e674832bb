//! HTTP 请求封装模块
//!
//! 基于 `web_sys::fetch` 的轻量级 HTTP 客户端，通过 `HttpClient` trait
//! 抽象以便在单元测试中注入 Mock 实现。请求体与响应体均为字符串，
//! JSON 编解码集中在本模块。

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// HTTP 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// HTTP 错误类型
#[derive(Debug, Clone)]
pub enum HttpError {
    /// 请求构建失败（序列化或 Headers 设置出错）
    RequestBuildFailed(String),
    /// 网络请求失败（fetch 被拒绝，DNS/连接层错误）
    NetworkError(String),
    /// 响应解析失败
    ResponseParseFailed(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "Failed to build request: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            HttpError::ResponseParseFailed(msg) => write!(f, "Failed to parse response: {}", msg),
        }
    }
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// 添加请求头
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// 设置 JSON 请求体
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, HttpError> {
        let json = serde_json::to_string(body)
            .map_err(|e| HttpError::RequestBuildFailed(e.to_string()))?;
        self.body = Some(json);
        Ok(self)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// HTTP 状态行文本（"Not Found" 等），用于拼接错误消息
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 将响应体解析为 JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::ResponseParseFailed(e.to_string()))
    }
}

/// HTTP 客户端特性 (Trait)
///
/// `(?Send)` 是因为浏览器环境下的 Future 不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: Fetch 客户端 (Production)
// =========================================================

/// 基于浏览器 `fetch` 的客户端实现
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        use wasm_bindgen::{JsCast, JsValue};
        use wasm_bindgen_futures::JsFuture;

        let headers = web_sys::Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;
        }

        let opts = web_sys::RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = web_sys::Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("no window object".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let response: web_sys::Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        let status = response.status();
        let status_text = response.status_text();

        let text_promise = response
            .text()
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        Ok(HttpResponse {
            status,
            status_text,
            body: text.as_string().unwrap_or_default(),
        })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

/// 测试中记录的请求
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

#[cfg(test)]
#[derive(Default)]
pub struct MockHttpClient {
    // URL -> (Status, Response Body)
    responses: RefCell<HashMap<String, (u16, String)>>,
    // 记录发出的请求，供断言使用
    pub requests: RefCell<Vec<RecordedRequest>>,
    // 模拟传输层错误
    network_failure: RefCell<Option<String>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), (status, body.to_string()));
    }

    /// 模拟无响应体的状态码（201/204 等）
    pub fn mock_status(&self, url: &str, status: u16) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), (status, String::new()));
    }

    pub fn fail_with(&self, message: &str) {
        *self.network_failure.borrow_mut() = Some(message.to_string());
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .borrow()
            .last()
            .expect("no request recorded")
            .clone()
    }

    fn status_text_for(status: u16) -> &'static str {
        match status {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            401 => "Unauthorized",
            404 => "Not Found",
            409 => "Conflict",
            500 => "Internal Server Error",
            _ => "",
        }
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: req.url.clone(),
            method: req.method,
            headers: req.headers.clone(),
            body: req.body.clone(),
        });

        if let Some(message) = self.network_failure.borrow().as_ref() {
            return Err(HttpError::NetworkError(message.clone()));
        }

        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&req.url) {
            Ok(HttpResponse {
                status: *status,
                status_text: Self::status_text_for(*status).to_string(),
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                status_text: "Not Found".to_string(),
                body: String::new(),
            })
        }
    }
}
