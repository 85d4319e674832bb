//! Bottle Tracker 共享数据模型
//!
//! 定义前端与远程 REST API 之间交换的 JSON DTO。
//! 此 crate 不依赖任何浏览器或框架，保持纯粹的数据层。

mod user;
mod wine;

pub use user::{LoginUserRequest, LoginUserResponse, RegisterUserRequest};
pub use wine::{CreateWineDTO, ExternalWine, GetWineDTO, UpdateWineDTO, WineRating, WineType};
