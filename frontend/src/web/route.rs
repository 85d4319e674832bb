//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的所有路由、其 URL 映射以及认证守卫属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 欢迎页 (默认路由)
    #[default]
    Home,
    /// 登录页；`username` 来自注册成功页的跳转预填
    Login { username: Option<String> },
    /// 注册页
    Register,
    /// 酒藏列表 (需要认证)
    Wines,
    /// 添加葡萄酒 (需要认证)；`barcode` 来自扫码/搜索页跳转
    AddWine { barcode: Option<String> },
    /// 条码搜索 (需要认证)
    SearchWines,
    /// 单瓶详情 (需要认证)
    WineDetail { id: String },
    /// 编辑 (需要认证)
    EditWine { id: String },
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL（path + 可选 query）解析为路由枚举
    pub fn from_url(url: &str) -> Self {
        let (path, query) = match url.split_once('?') {
            Some((p, q)) => (p, q),
            None => (url, ""),
        };
        // 统一去掉末尾斜杠，"/wines/" 与 "/wines" 等价
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match path {
            "/" => Self::Home,
            "/login" => Self::Login {
                username: query_param(query, "username"),
            },
            "/register" => Self::Register,
            "/wines" => Self::Wines,
            "/wines/add" => Self::AddWine {
                barcode: query_param(query, "barcode"),
            },
            "/wines/search" => Self::SearchWines,
            _ => {
                if let Some(id) = match_segment(path, "/wines/") {
                    Self::WineDetail { id }
                } else if let Some(id) = match_segment(path, "/edit-wine/") {
                    Self::EditWine { id }
                } else {
                    Self::NotFound
                }
            }
        }
    }

    /// 获取路由对应的 URL（含 query）
    pub fn to_url(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login { username: None } => "/login".to_string(),
            Self::Login {
                username: Some(name),
            } => format!("/login?username={}", encode_component(name)),
            Self::Register => "/register".to_string(),
            Self::Wines => "/wines".to_string(),
            Self::AddWine { barcode: None } => "/wines/add".to_string(),
            Self::AddWine {
                barcode: Some(code),
            } => format!("/wines/add?barcode={}", encode_component(code)),
            Self::SearchWines => "/wines/search".to_string(),
            Self::WineDetail { id } => format!("/wines/{}", encode_component(id)),
            Self::EditWine { id } => format!("/edit-wine/{}", encode_component(id)),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Wines
                | Self::AddWine { .. }
                | Self::SearchWines
                | Self::WineDetail { .. }
                | Self::EditWine { .. }
        )
    }

    /// 已认证用户是否应该离开此路由（登录/注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login { .. } | Self::Register)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login { username: None }
    }

    /// 认证成功时的重定向目标（从登录/注册页）
    pub fn auth_success_redirect() -> Self {
        Self::Wines
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_url())
    }
}

/// 匹配 `prefix` 后紧跟单个非空段的路径，返回解码后的段
fn match_segment(path: &str, prefix: &str) -> Option<String> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    Some(decode_component(rest))
}

/// 从 query string 中提取参数值（已解码）
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| decode_component(v))
}

/// 最小化的 percent 编码：仅处理 URL 组件中的保留字符
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// percent 解码；'+' 按表单编码惯例视为空格，非法序列原样保留
pub fn decode_component(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                if let (Some(hi), Some(lo)) = (
                    bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16)),
                    bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16)),
                ) {
                    out.push((hi * 16 + lo) as u8);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_static_routes() {
        assert_eq!(AppRoute::from_url("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_url("/register"), AppRoute::Register);
        assert_eq!(AppRoute::from_url("/wines"), AppRoute::Wines);
        assert_eq!(AppRoute::from_url("/wines/"), AppRoute::Wines);
        assert_eq!(AppRoute::from_url("/wines/search"), AppRoute::SearchWines);
        assert_eq!(AppRoute::from_url("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn parses_dynamic_segments() {
        assert_eq!(
            AppRoute::from_url("/wines/42"),
            AppRoute::WineDetail { id: "42".into() }
        );
        assert_eq!(
            AppRoute::from_url("/edit-wine/abc-123"),
            AppRoute::EditWine { id: "abc-123".into() }
        );
        // 多余的路径段不匹配
        assert_eq!(AppRoute::from_url("/wines/42/extra"), AppRoute::NotFound);
    }

    #[test]
    fn parses_query_parameters() {
        assert_eq!(
            AppRoute::from_url("/wines/add?barcode=4001234567890"),
            AppRoute::AddWine {
                barcode: Some("4001234567890".into())
            }
        );
        assert_eq!(
            AppRoute::from_url("/wines/add"),
            AppRoute::AddWine { barcode: None }
        );
        assert_eq!(
            AppRoute::from_url("/login?username=John%20Doe"),
            AppRoute::Login {
                username: Some("John Doe".into())
            }
        );
    }

    #[test]
    fn url_round_trip_preserves_params() {
        let route = AppRoute::AddWine {
            barcode: Some("4001234567890".into()),
        };
        assert_eq!(AppRoute::from_url(&route.to_url()), route);

        let route = AppRoute::Login {
            username: Some("John Doe".into()),
        };
        assert_eq!(route.to_url(), "/login?username=John%20Doe");
        assert_eq!(AppRoute::from_url(&route.to_url()), route);
    }

    #[test]
    fn guard_table() {
        assert!(AppRoute::Wines.requires_auth());
        assert!(AppRoute::WineDetail { id: "1".into() }.requires_auth());
        assert!(AppRoute::AddWine { barcode: None }.requires_auth());
        assert!(!AppRoute::Home.requires_auth());
        assert!(!AppRoute::Register.requires_auth());

        assert!(AppRoute::Login { username: None }.should_redirect_when_authenticated());
        assert!(AppRoute::Register.should_redirect_when_authenticated());
        assert!(!AppRoute::Wines.should_redirect_when_authenticated());
    }
}
