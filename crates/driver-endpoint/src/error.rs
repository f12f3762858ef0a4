//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 集中声明端点解析、时间源工厂与配置解析三类失败路径，统一以 `thiserror` 派生对外暴露；
//! - 每个变体提供稳定错误码（`code()`），便于拓扑刷新循环按码值聚合告警，而非解析自然语言消息。
//!
//! ## 设计要求（What）
//! - [`ResolveError`] 只描述“单行失败”，调用方跳过该行即可，不得影响同一轮刷新中的其它行；
//! - [`ClockError`] 属于启动期致命错误，不做重试；
//! - [`ConfigError`] 在客户端构造阶段暴露，调用方应直接终止启动流程。
//!
//! ## 风险提示（Trade-offs）
//! - “节点尚未加入拓扑”（`peer` 为空或缺失）不是错误，解析器以 `Ok(None)` 表达，请勿在此新增对应变体。

use thiserror::Error;

/// 拓扑行解析失败的稳定错误码。
pub mod codes {
    pub const MISSING_COLUMN: &str = "driver.topology.missing_column";
    pub const TYPE_MISMATCH: &str = "driver.topology.type_mismatch";
    pub const NULL_VALUE: &str = "driver.topology.null_value";
    pub const PORT_OUT_OF_RANGE: &str = "driver.topology.port_out_of_range";
    pub const CLOCK_BEFORE_EPOCH: &str = "driver.clock.before_epoch";
    pub const CONFIG_PARSE: &str = "driver.config.parse";
    pub const CONFIG_INVALID_BOOLEAN: &str = "driver.config.invalid_boolean";
    pub const CONFIG_INVALID_MAPPING: &str = "driver.config.invalid_mapping";
}

/// 单行拓扑数据无法转换为端点时返回的错误。
///
/// # 教案式说明
/// - **意图 (Why)**：行访问器遇到缺列、类型不符或端口越界时必须“硬失败”，而不是静默回退到默认值，
///   否则客户端可能连向错误的节点。
/// - **契约 (What)**：
///   - `column` 字段始终为 [`crate::row::columns`] 中的常量或调用方传入的列名；
///   - 错误仅影响当前行，调用方可继续处理后续行；
/// - **风险 (Trade-offs)**：列名使用 `String` 保存，允许测试或宿主传入动态列名，代价是一次小的堆分配。
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ResolveError {
    /// 访问的列不存在于该行的列定义中。
    #[error("column `{column}` is not defined in the topology row")]
    MissingColumn { column: String },

    /// 列存在，但存储值的类型与访问器不符。
    #[error("column `{column}` holds a {found} value, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    /// 现代 schema 下必填的列为 null。
    #[error("column `{column}` is null but a value is required")]
    NullValue { column: String },

    /// 端口值超出 `0..=65535`。
    #[error("column `{column}` holds port {value}, which is outside 0..=65535")]
    PortOutOfRange { column: String, value: i32 },
}

impl ResolveError {
    /// 返回稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::MissingColumn { .. } => codes::MISSING_COLUMN,
            ResolveError::TypeMismatch { .. } => codes::TYPE_MISMATCH,
            ResolveError::NullValue { .. } => codes::NULL_VALUE,
            ResolveError::PortOutOfRange { .. } => codes::PORT_OUT_OF_RANGE,
        }
    }

    /// 触发失败的列名。
    pub fn column(&self) -> &str {
        match self {
            ResolveError::MissingColumn { column }
            | ResolveError::TypeMismatch { column, .. }
            | ResolveError::NullValue { column }
            | ResolveError::PortOutOfRange { column, .. } => column,
        }
    }
}

/// 时间源工厂在启动期无法构造任何时钟实现。
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ClockError {
    /// 宿主墙钟早于 Unix 纪元，毫秒与高精度实现均无法给出有意义的读数。
    #[error("host wall clock reads {behind_millis} ms before the Unix epoch")]
    WallClockBeforeEpoch { behind_millis: u128 },
}

impl ClockError {
    pub fn code(&self) -> &'static str {
        match self {
            ClockError::WallClockBeforeEpoch { .. } => codes::CLOCK_BEFORE_EPOCH,
        }
    }
}

/// 配置解析失败。
///
/// - **意图 (Why)**：把 TOML 语法错误、环境变量覆盖值非法、静态地址映射非法三类问题归拢，
///   使客户端构造阶段能够一次性给出可读诊断；
/// - **契约 (What)**：所有变体均在启动期返回，调用方不应重试。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse driver settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("environment override `{key}` must be a boolean, got `{value}`")]
    InvalidBoolean { key: &'static str, value: String },

    #[error("address mapping `{from}` -> `{to}` is invalid: {reason}")]
    InvalidMapping {
        from: String,
        to: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Parse(_) => codes::CONFIG_PARSE,
            ConfigError::InvalidBoolean { .. } => codes::CONFIG_INVALID_BOOLEAN,
            ConfigError::InvalidMapping { .. } => codes::CONFIG_INVALID_MAPPING,
        }
    }
}
