#![deny(unsafe_code)]
#![doc = r#"
# driver-endpoint

## 设计动机（Why）
- **定位**：分布式数据库客户端在拓扑刷新时，需要把集群元数据表中的节点记录解析为可拨号的端点；
  节点广播的地址往往不能被客户端直接访问（NAT、VPC 对等、多区域），因此解析过程中必须经过
  可插拔的地址转换策略。
- **附带能力**：提供“微秒标注”的时间源抽象，供超时、推测重试等延迟敏感逻辑使用。

## 核心契约（What）
- [`resolver::EndpointResolver`]：`init` 注入 [`cluster::ClusterContext`] 之后，`create` 把
  [`row::TopologyRow`] 解析为零或一个 [`endpoint::EndPoint`]；
- [`translator::AddressTranslator`]：`translate(address, port)`，每一行都会被调用；
- [`time::TimeSource`]：`now_micros()`，由 [`time::new_time_source`] 按配置选择实现。

## 实现策略（How）
- 行的 schema 差异通过 [`resolver::RowShape`] 一次归类、确定性分派；
- 集群上下文以 `arc-swap` 原子发布，`create` 无锁且可重入；
- 所有诊断经由 `tracing` 输出，本 crate 不安装订阅者。

## 风险与考量（Trade-offs）
- 本 crate 不做网络 I/O、不缓存端点、不决定何时刷新拓扑，这些职责属于外部集群管理层。
"#]

pub mod cluster;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod resolver;
pub mod row;
/// 测试桩命名空间，集中暴露记录型转换器等实现，供集成测试与宿主的契约测试复用。
pub mod test_stubs;
pub mod time;
pub mod translator;

pub use cluster::ClusterContext;
pub use config::{ClockSettings, DriverSettings, TranslationSettings};
pub use endpoint::EndPoint;
pub use error::{ClockError, ConfigError, ResolveError};
pub use resolver::{DefaultEndpointResolver, EndpointResolver, RowShape, resolve_all};
pub use row::{ColumnValue, PeerRow, TopologyRow};
pub use time::{ClockResolution, TimeSource, new_time_source};
pub use translator::{AddressTranslator, IdentityTranslator, StaticMappingTranslator};
