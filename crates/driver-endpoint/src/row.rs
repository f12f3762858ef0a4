//! 拓扑行只读视图。
//!
//! # 模块定位（Why）
//! - 集群元数据表（`system.peers` / `system.peers_v2`）的行由外部刷新流程读取，本 crate 只需要
//!   “列是否存在 + 按类型取值”两种能力；以 [`TopologyRow`] trait 描述该最小契约，避免绑定具体协议层的行类型。
//! - [`PeerRow`] 是内存实现，供宿主在协议层解码后直接构造，也用于测试。
//!
//! # 契约说明（What）
//! - 访问器在列缺失时返回 [`ResolveError::MissingColumn`]，类型不符时返回 [`ResolveError::TypeMismatch`]；
//! - SQL null 以 `Ok(None)` 表达，是否视为错误由调用方（解析器）决定；
//! - 行在解析过程中只读，任何实现都不得借访问器修改内部状态。

use std::collections::BTreeMap;
use std::net::IpAddr;

use crate::error::ResolveError;

/// 解析器消费的列名。
pub mod columns {
    /// 现代 schema：节点对客户端广播的地址。
    pub const NATIVE_ADDRESS: &str = "native_address";
    /// 现代 schema：与 `native_address` 配套的端口。
    pub const NATIVE_PORT: &str = "native_port";
    /// 旧版 schema：节点的广播地址，不带端口。
    pub const PEER: &str = "peer";
}

/// 单个节点元数据记录的只读视图。
///
/// 实现必须是无副作用的：同一行上重复调用访问器应返回相同结果。
pub trait TopologyRow {
    /// 该行的列定义是否包含 `column`。
    fn contains(&self, column: &str) -> bool;

    /// 读取网络地址列。
    fn get_inet(&self, column: &str) -> Result<Option<IpAddr>, ResolveError>;

    /// 读取 32 位整数列。
    fn get_int(&self, column: &str) -> Result<Option<i32>, ResolveError>;
}

/// 列值的最小类型集合。
///
/// `Text` 用于承载解析器不关心的列（如 `data_center`、`rack`），使 [`PeerRow`] 能完整还原一行记录。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnValue {
    Inet(IpAddr),
    Int(i32),
    Text(String),
    Null,
}

impl ColumnValue {
    fn kind(&self) -> &'static str {
        match self {
            ColumnValue::Inet(_) => "inet",
            ColumnValue::Int(_) => "int",
            ColumnValue::Text(_) => "text",
            ColumnValue::Null => "null",
        }
    }
}

/// 基于有序映射的内存拓扑行。
///
/// # 教案式说明
/// - **意图 (Why)**：协议层解码结果与测试夹具需要一个轻量、可比较的行表示；
/// - **契约 (What)**：列名唯一，后写覆盖先写；`Null` 列视为“存在但为空”，与“列缺失”严格区分；
/// - **实现 (How)**：`BTreeMap` 保证 `Debug` 输出顺序稳定，便于在日志与断言中比对。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PeerRow {
    values: BTreeMap<String, ColumnValue>,
}

impl PeerRow {
    pub fn builder() -> PeerRowBuilder {
        PeerRowBuilder::default()
    }

    /// 列定义中的全部列名，按字典序。
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    fn lookup(&self, column: &str) -> Result<&ColumnValue, ResolveError> {
        self.values
            .get(column)
            .ok_or_else(|| ResolveError::MissingColumn {
                column: column.to_owned(),
            })
    }
}

impl TopologyRow for PeerRow {
    fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    fn get_inet(&self, column: &str) -> Result<Option<IpAddr>, ResolveError> {
        match self.lookup(column)? {
            ColumnValue::Inet(addr) => Ok(Some(*addr)),
            ColumnValue::Null => Ok(None),
            other => Err(ResolveError::TypeMismatch {
                column: column.to_owned(),
                expected: "inet",
                found: other.kind(),
            }),
        }
    }

    fn get_int(&self, column: &str) -> Result<Option<i32>, ResolveError> {
        match self.lookup(column)? {
            ColumnValue::Int(value) => Ok(Some(*value)),
            ColumnValue::Null => Ok(None),
            other => Err(ResolveError::TypeMismatch {
                column: column.to_owned(),
                expected: "int",
                found: other.kind(),
            }),
        }
    }
}

/// [`PeerRow`] 构造器。
#[derive(Debug, Default)]
pub struct PeerRowBuilder {
    values: BTreeMap<String, ColumnValue>,
}

impl PeerRowBuilder {
    pub fn inet(self, column: impl Into<String>, addr: IpAddr) -> Self {
        self.value(column, ColumnValue::Inet(addr))
    }

    pub fn int(self, column: impl Into<String>, value: i32) -> Self {
        self.value(column, ColumnValue::Int(value))
    }

    pub fn text(self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.value(column, ColumnValue::Text(value.into()))
    }

    pub fn null(self, column: impl Into<String>) -> Self {
        self.value(column, ColumnValue::Null)
    }

    pub fn value(mut self, column: impl Into<String>, value: ColumnValue) -> Self {
        self.values.insert(column.into(), value);
        self
    }

    pub fn build(self) -> PeerRow {
        PeerRow {
            values: self.values,
        }
    }
}
