//! 用户接口的请求/响应模型

use serde::{Deserialize, Serialize};

/// `POST /users/register` 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub password: String,
}

/// `POST /users/login` 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUserRequest {
    pub name: String,
    pub password: String,
}

/// `POST /users/login` 成功响应体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUserResponse {
    pub token: String,
}
