//! 驱动端点相关配置。
//!
//! # 模块定位（Why）
//! - 时间源选择与地址转换都是启动期的一次性决策，集中在 [`DriverSettings`] 中以 TOML 描述；
//! - 读取配置文件属于宿主职责，本模块只负责把已加载的文本解析为强类型设置，并构建对应的运行时组件。
//!
//! # 配置示例（What）
//! ```toml
//! [clock]
//! use_native_clock = true
//!
//! [translation]
//! default_port = 9042
//! [translation.mappings]
//! "10.0.0.9" = "203.0.113.9:9042"
//! ```
//!
//! # 风险提示（Trade-offs）
//! - 所有字段均有默认值，空文本即得到默认配置；未知字段被拒绝，避免拼写错误被静默忽略。

use std::collections::BTreeMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::translator::{
    AddressTranslator, DEFAULT_NATIVE_PORT, IdentityTranslator, StaticMappingTranslator,
};

/// 覆盖 `clock.use_native_clock` 的环境变量名。
pub const USE_NATIVE_CLOCK_ENV: &str = "DRIVER_USE_NATIVE_CLOCK";

/// 端点解析与时间源的完整配置。
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverSettings {
    pub clock: ClockSettings,
    pub translation: TranslationSettings,
}

impl DriverSettings {
    /// 从 TOML 文本解析。
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// 时间源工厂消费的配置。
///
/// # 契约说明（What）
/// - `use_native_clock` 默认开启；即便开启，宿主不具备高精度时钟时工厂也会静默回退到毫秒实现；
/// - 环境变量 [`USE_NATIVE_CLOCK_ENV`] 可在部署期覆盖该值，接受 `true`/`false`/`1`/`0`/`yes`/`no`（忽略大小写）。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockSettings {
    pub use_native_clock: bool,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            use_native_clock: true,
        }
    }
}

impl ClockSettings {
    /// 以注入的查找函数应用环境变量覆盖。
    ///
    /// 查找函数以变量名为参数，返回 `None` 表示未设置；测试可传入闭包而不必修改进程环境。
    pub fn apply_env_override<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(USE_NATIVE_CLOCK_ENV) {
            self.use_native_clock = parse_bool(&raw).ok_or(ConfigError::InvalidBoolean {
                key: USE_NATIVE_CLOCK_ENV,
                value: raw.clone(),
            })?;
        }
        Ok(self)
    }

    /// 读取进程环境变量并应用覆盖。
    pub fn with_process_env(self) -> Result<Self, ConfigError> {
        self.apply_env_override(|key| std::env::var(key).ok())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// 地址转换配置。
///
/// # 教案式说明
/// - **意图 (Why)**：旧版 schema 的行不携带端口，默认端口必须来自外部配置而不是从行内推断；
///   NAT 场景下的静态映射也在此声明；
/// - **契约 (What)**：`mappings` 的键为节点广播的 IP，值为客户端可达的 `ip:port`；
///   为空时构建恒等转换器，否则构建静态映射转换器；
/// - **实现 (How)**：映射以字符串读入，在 [`TranslationSettings::build_translator`] 中统一解析，
///   以便报错时原样回显配置中的写法。
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslationSettings {
    pub default_port: u16,
    pub mappings: BTreeMap<String, String>,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            default_port: DEFAULT_NATIVE_PORT,
            mappings: BTreeMap::new(),
        }
    }
}

impl TranslationSettings {
    /// 按配置构建转换器。
    pub fn build_translator(&self) -> Result<Arc<dyn AddressTranslator>, ConfigError> {
        if self.mappings.is_empty() {
            return Ok(Arc::new(IdentityTranslator::new(self.default_port)));
        }

        let mut translator = StaticMappingTranslator::new(self.default_port);
        for (from, to) in &self.mappings {
            let advertised: IpAddr = from.parse().map_err(|err| ConfigError::InvalidMapping {
                from: from.clone(),
                to: to.clone(),
                reason: format!("advertised address: {err}"),
            })?;
            let reachable: SocketAddr = to.parse().map_err(|err| ConfigError::InvalidMapping {
                from: from.clone(),
                to: to.clone(),
                reason: format!("reachable address: {err}"),
            })?;
            translator = translator.with_mapping(advertised, reachable);
        }
        Ok(Arc::new(translator))
    }
}
