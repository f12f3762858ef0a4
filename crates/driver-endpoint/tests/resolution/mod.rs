//! 端点解析集成测试入口。
//!
//! # 模块目的（Why）
//! - 从 crate 外部以公开 API 驱动解析器，覆盖典型场景、性质测试与并发读取三类约束；
//! - 统一挂在 `resolution` 测试目标下，便于 `cargo test -p driver-endpoint --test resolution` 单独运行。
//!
//! # 结构概览（What）
//! - `scenarios`：现代/旧版 schema 与 NAT 映射的典型场景，以及批量解析时的单行失败隔离；
//! - `properties`：基于 proptest 的“恰好一次转换、参数与行内取值一致”性质；
//! - `concurrency`：多线程并发 `create` 与上下文重绑定。

mod scenarios;

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use driver_endpoint::test_stubs::RecordingTranslator;
use driver_endpoint::{ClusterContext, DefaultEndpointResolver};

fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(a, b, c, d))
}

/// 构造注入了记录型转换器的解析器，并返回转换器句柄供断言。
fn recording_resolver(
    translator: RecordingTranslator,
) -> (DefaultEndpointResolver, RecordingTranslator) {
    let context = ClusterContext::new(Arc::new(translator.clone()));
    let resolver = DefaultEndpointResolver::with_context(Arc::new(context));
    (resolver, translator)
}
