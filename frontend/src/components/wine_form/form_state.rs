//! 葡萄酒表单状态管理模块
//!
//! 添加与编辑两个工作流共用。负责：
//! - 字段数据的持有（字符串保持输入原样，提交时才转换）
//! - 字段级校验与错误清除
//! - 表单数据到 DTO 的转换

use bottle_tracker_shared::{CreateWineDTO, GetWineDTO, UpdateWineDTO, WineRating, WineType};
use leptos::prelude::*;

/// 字段级错误集合；`None` 表示该字段当前无错误
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WineFormErrors {
    pub name: Option<String>,
    pub country: Option<String>,
    pub vintage_year: Option<String>,
    pub wine_type: Option<String>,
}

impl WineFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.country.is_none()
            && self.vintage_year.is_none()
            && self.wine_type.is_none()
    }
}

/// 表单字段的纯数据快照
///
/// 校验与 DTO 转换都定义在快照上，不接触信号，可直接单元测试。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WineFormDraft {
    pub name: String,
    pub country: String,
    /// 字符串形式的年份；空串表示未填写（字段可选）
    pub vintage_year: String,
    /// `None` 表示尚未选择类型
    pub wine_type: Option<WineType>,
    pub rating: WineRating,
    pub barcode: String,
}

impl WineFormDraft {
    /// 对当前快照求值的纯校验函数；对相同输入总是产生相同结果
    pub fn validate(&self) -> WineFormErrors {
        let mut errors = WineFormErrors::default();

        if self.name.trim().is_empty() {
            errors.name = Some("Wine name is required".to_string());
        }

        if self.country.trim().is_empty() {
            errors.country = Some("Country is required".to_string());
        }

        if self.wine_type.is_none() {
            errors.wine_type = Some("Wine type is required".to_string());
        }

        // 年份可选，填了就必须是恰好 4 位数字
        if !self.vintage_year.is_empty() && !is_four_digit_year(&self.vintage_year) {
            errors.vintage_year = Some("Vintage year must be exactly 4 digits".to_string());
        }

        errors
    }

    fn vintage_year_value(&self) -> Option<u16> {
        if self.vintage_year.is_empty() {
            None
        } else {
            self.vintage_year.parse().ok()
        }
    }

    fn barcode_value(&self) -> Option<String> {
        let trimmed = self.barcode.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// 转换为创建请求；类型未选时返回 `None`（调用方应先校验）
    pub fn to_create_dto(&self) -> Option<CreateWineDTO> {
        Some(CreateWineDTO {
            name: self.name.trim().to_string(),
            country: self.country.trim().to_string(),
            vintage_year: self.vintage_year_value(),
            wine_type: self.wine_type?,
            rating: self.rating,
            barcode: self.barcode_value(),
        })
    }

    /// 转换为全量更新请求
    pub fn to_update_dto(&self) -> Option<UpdateWineDTO> {
        Some(UpdateWineDTO {
            name: self.name.trim().to_string(),
            country: self.country.trim().to_string(),
            vintage_year: self.vintage_year_value(),
            wine_type: self.wine_type?,
            rating: self.rating,
            barcode: self.barcode_value(),
        })
    }
}

fn is_four_digit_year(value: &str) -> bool {
    value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit())
}

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct WineFormState {
    pub name: RwSignal<String>,
    pub country: RwSignal<String>,
    pub vintage_year: RwSignal<String>,
    pub wine_type: RwSignal<Option<WineType>>,
    pub rating: RwSignal<WineRating>,
    pub barcode: RwSignal<String>,

    pub errors: RwSignal<WineFormErrors>,
    /// 非字段特定的提交失败（技术性错误）
    pub general_error: RwSignal<bool>,
    pub is_submitting: RwSignal<bool>,
}

impl WineFormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            country: RwSignal::new(String::new()),
            vintage_year: RwSignal::new(String::new()),
            wine_type: RwSignal::new(None),
            rating: RwSignal::new(WineRating::None),
            barcode: RwSignal::new(String::new()),
            errors: RwSignal::new(WineFormErrors::default()),
            general_error: RwSignal::new(false),
            is_submitting: RwSignal::new(false),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.name.set(String::new());
        self.country.set(String::new());
        self.vintage_year.set(String::new());
        self.wine_type.set(None);
        self.rating.set(WineRating::None);
        self.barcode.set(String::new());
        self.errors.set(WineFormErrors::default());
        self.general_error.set(false);
        self.is_submitting.set(false);
    }

    /// 用已有记录填充表单（编辑工作流挂载时）
    pub fn seed_from(&self, wine: &GetWineDTO) {
        self.name.set(wine.name.clone());
        self.country.set(wine.country.clone());
        self.vintage_year
            .set(wine.vintage_year.map(|y| y.to_string()).unwrap_or_default());
        self.wine_type.set(Some(wine.wine_type));
        self.rating.set(wine.rating);
        self.barcode.set(wine.barcode.clone().unwrap_or_default());
    }

    // 字段变更入口：写入新值，清除该字段错误与全局错误（视为全新尝试）

    pub fn set_name(&self, value: String) {
        self.name.set(value);
        self.errors.update(|e| e.name = None);
        self.general_error.set(false);
    }

    pub fn set_country(&self, value: String) {
        self.country.set(value);
        self.errors.update(|e| e.country = None);
        self.general_error.set(false);
    }

    pub fn set_vintage_year(&self, value: String) {
        self.vintage_year.set(value);
        self.errors.update(|e| e.vintage_year = None);
        self.general_error.set(false);
    }

    pub fn set_wine_type(&self, value: Option<WineType>) {
        self.wine_type.set(value);
        self.errors.update(|e| e.wine_type = None);
        self.general_error.set(false);
    }

    pub fn set_rating(&self, value: WineRating) {
        self.rating.set(value);
        self.general_error.set(false);
    }

    pub fn set_barcode(&self, value: String) {
        self.barcode.set(value);
        self.general_error.set(false);
    }

    /// 当前字段值的纯数据快照
    pub fn snapshot(&self) -> WineFormDraft {
        WineFormDraft {
            name: self.name.get_untracked(),
            country: self.country.get_untracked(),
            vintage_year: self.vintage_year.get_untracked(),
            wine_type: self.wine_type.get_untracked(),
            rating: self.rating.get_untracked(),
            barcode: self.barcode.get_untracked(),
        }
    }

    /// 运行校验并发布错误；返回表单是否有效
    pub fn validate(&self) -> bool {
        let errors = self.snapshot().validate();
        let valid = errors.is_empty();
        self.errors.set(errors);
        valid
    }
}

impl Default for WineFormState {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> WineFormDraft {
        WineFormDraft {
            name: "Bordeaux Rouge".into(),
            country: "France".into(),
            vintage_year: "2020".into(),
            wine_type: Some(WineType::Red),
            rating: WineRating::None,
            barcode: String::new(),
        }
    }

    #[test]
    fn required_fields_reject_whitespace_only_input() {
        let draft = WineFormDraft {
            name: "   ".into(),
            country: "".into(),
            wine_type: None,
            ..Default::default()
        };
        let errors = draft.validate();
        assert_eq!(errors.name.as_deref(), Some("Wine name is required"));
        assert_eq!(errors.country.as_deref(), Some("Country is required"));
        assert_eq!(errors.wine_type.as_deref(), Some("Wine type is required"));
    }

    #[test]
    fn vintage_year_boundaries() {
        let mut draft = valid_draft();

        draft.vintage_year = "".into();
        assert!(draft.validate().is_empty());

        draft.vintage_year = "202".into();
        assert_eq!(
            draft.validate().vintage_year.as_deref(),
            Some("Vintage year must be exactly 4 digits")
        );

        draft.vintage_year = "2020".into();
        assert!(draft.validate().is_empty());

        draft.vintage_year = "20201".into();
        assert_eq!(
            draft.validate().vintage_year.as_deref(),
            Some("Vintage year must be exactly 4 digits")
        );

        draft.vintage_year = "20a0".into();
        assert!(draft.validate().vintage_year.is_some());
    }

    #[test]
    fn validation_is_idempotent() {
        let draft = WineFormDraft {
            vintage_year: "99".into(),
            ..Default::default()
        };
        assert_eq!(draft.validate(), draft.validate());
    }

    #[test]
    fn create_dto_trims_coerces_and_omits() {
        let draft = WineFormDraft {
            name: "  Bordeaux Rouge  ".into(),
            country: " France ".into(),
            vintage_year: "2020".into(),
            wine_type: Some(WineType::Red),
            rating: WineRating::None,
            barcode: "".into(),
        };

        let dto = draft.to_create_dto().unwrap();
        assert_eq!(dto.name, "Bordeaux Rouge");
        assert_eq!(dto.country, "France");
        assert_eq!(dto.vintage_year, Some(2020));
        assert_eq!(dto.wine_type, WineType::Red);
        assert_eq!(dto.rating, WineRating::None);
        assert_eq!(dto.barcode, None);
    }

    #[test]
    fn dto_conversion_requires_wine_type() {
        let draft = WineFormDraft::default();
        assert_eq!(draft.to_create_dto(), None);
        assert_eq!(draft.to_update_dto(), None);
    }

    #[test]
    fn field_change_clears_only_that_error() {
        let state = WineFormState::new();
        assert!(!state.validate());

        let errors = state.errors.get_untracked();
        assert!(errors.name.is_some());
        assert!(errors.country.is_some());

        state.set_name("Bordeaux Rouge".into());
        let errors = state.errors.get_untracked();
        assert!(errors.name.is_none());
        // 其他字段错误保持不变
        assert!(errors.country.is_some());
        assert!(errors.wine_type.is_some());
    }

    #[test]
    fn field_change_clears_general_error() {
        let state = WineFormState::new();
        state.general_error.set(true);
        state.set_country("Italy".into());
        assert!(!state.general_error.get_untracked());
    }

    #[test]
    fn seed_from_populates_string_forms() {
        let state = WineFormState::new();
        state.seed_from(&GetWineDTO {
            id: "42".into(),
            name: "Barolo".into(),
            country: "Italy".into(),
            vintage_year: Some(2018),
            wine_type: WineType::Red,
            rating: WineRating::Good,
            barcode: None,
        });

        assert_eq!(state.name.get_untracked(), "Barolo");
        assert_eq!(state.vintage_year.get_untracked(), "2018");
        assert_eq!(state.wine_type.get_untracked(), Some(WineType::Red));
        assert_eq!(state.rating.get_untracked(), WineRating::Good);
        assert_eq!(state.barcode.get_untracked(), "");
    }
}
