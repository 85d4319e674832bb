//! 葡萄酒接口的 DTO 定义
//!
//! 字段命名与远程 API 的 JSON 保持一致：枚举值为全大写字符串，
//! `type` 为保留字，因此 Rust 侧命名为 `wine_type` 并通过 serde 重命名。

use serde::{Deserialize, Serialize};

// =========================================================
// 领域枚举 (Domain Enums)
// =========================================================

/// 葡萄酒类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WineType {
    Red,
    White,
    Sparkling,
    Rose,
}

impl WineType {
    /// 所有类型，用于表单下拉选项
    pub const ALL: [WineType; 4] = [
        WineType::Red,
        WineType::White,
        WineType::Sparkling,
        WineType::Rose,
    ];

    /// 线上枚举值（同时用作 `<select>` 的 value）
    pub fn as_str(&self) -> &'static str {
        match self {
            WineType::Red => "RED",
            WineType::White => "WHITE",
            WineType::Sparkling => "SPARKLING",
            WineType::Rose => "ROSE",
        }
    }

    /// 界面展示用标签
    pub fn label(&self) -> &'static str {
        match self {
            WineType::Red => "Red",
            WineType::White => "White",
            WineType::Sparkling => "Sparkling",
            WineType::Rose => "Rosé",
        }
    }

    /// 从 `<select>` 的 value 解析；空字符串或未知值返回 `None`
    pub fn from_form_value(value: &str) -> Option<WineType> {
        WineType::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// 个人评分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WineRating {
    Good,
    Ok,
    Bad,
    None,
}

impl Default for WineRating {
    fn default() -> Self {
        WineRating::None
    }
}

impl WineRating {
    pub const ALL: [WineRating; 4] = [
        WineRating::None,
        WineRating::Good,
        WineRating::Ok,
        WineRating::Bad,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WineRating::Good => "GOOD",
            WineRating::Ok => "OK",
            WineRating::Bad => "BAD",
            WineRating::None => "NONE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WineRating::Good => "Good",
            WineRating::Ok => "Ok",
            WineRating::Bad => "Bad",
            WineRating::None => "Not rated",
        }
    }

    pub fn from_form_value(value: &str) -> Option<WineRating> {
        WineRating::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

// =========================================================
// DTO 定义
// =========================================================

/// 服务端返回的葡萄酒记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetWineDTO {
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vintage_year: Option<u16>,
    #[serde(rename = "type")]
    pub wine_type: WineType,
    pub rating: WineRating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

/// `POST /wines` 请求体；`id` 由服务端分配，创建时不存在
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWineDTO {
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vintage_year: Option<u16>,
    #[serde(rename = "type")]
    pub wine_type: WineType,
    pub rating: WineRating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

/// `PUT /wines/{id}` 请求体；客户端总是提交完整 DTO，不做局部 diff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateWineDTO {
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vintage_year: Option<u16>,
    #[serde(rename = "type")]
    pub wine_type: WineType,
    pub rating: WineRating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

/// 外部条码目录的查询结果（只读，仅用于预填表单，从不回存）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalWine {
    pub name: String,
    pub country: String,
    /// 外部目录的类型词表与 [`WineType`] 不一定对应，保持原始字符串
    #[serde(rename = "type")]
    pub wine_type: String,
    pub price: f64,
    pub volume: f64,
}

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_dto_omits_absent_optionals() {
        let dto = CreateWineDTO {
            name: "Bordeaux Rouge".into(),
            country: "France".into(),
            vintage_year: None,
            wine_type: WineType::Red,
            rating: WineRating::None,
            barcode: None,
        };

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Bordeaux Rouge",
                "country": "France",
                "type": "RED",
                "rating": "NONE",
            })
        );
    }

    #[test]
    fn get_dto_parses_api_payload() {
        let wine: GetWineDTO = serde_json::from_value(json!({
            "id": "42",
            "name": "Grüner Veltliner",
            "country": "Austria",
            "vintage_year": 2020,
            "type": "WHITE",
            "rating": "GOOD",
            "barcode": "9001234567894",
        }))
        .unwrap();

        assert_eq!(wine.wine_type, WineType::White);
        assert_eq!(wine.vintage_year, Some(2020));
        assert_eq!(wine.barcode.as_deref(), Some("9001234567894"));
    }

    #[test]
    fn enum_form_values_round_trip() {
        assert_eq!(WineType::from_form_value("ROSE"), Some(WineType::Rose));
        assert_eq!(WineType::from_form_value(""), None);
        assert_eq!(WineRating::from_form_value("NONE"), Some(WineRating::None));
    }
}
