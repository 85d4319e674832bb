//! 原生 Web API 封装模块
//!
//! 提供对浏览器原生 API 的轻量级封装（fetch、LocalStorage、History 路由），
//! 替代 gloo-* 系列 crate 以减小 WASM 二进制体积。

pub mod http;
pub mod route;
pub mod router;
mod storage;

pub use http::{FetchHttpClient, HttpClient, HttpError, HttpMethod, HttpRequest};
pub use storage::LocalStorage;
