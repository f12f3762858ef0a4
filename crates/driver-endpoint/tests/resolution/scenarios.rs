use std::net::SocketAddr;
use std::sync::Arc;

use driver_endpoint::error::codes;
use driver_endpoint::row::columns;
use driver_endpoint::test_stubs::{RecordingTranslator, TranslateCall};
use driver_endpoint::{
    ClusterContext, DefaultEndpointResolver, EndpointResolver, IdentityTranslator, PeerRow,
    ResolveError, StaticMappingTranslator, resolve_all,
};

use super::{recording_resolver, v4};

fn addr(text: &str) -> SocketAddr {
    text.parse().expect("socket addr")
}

#[test]
fn modern_row_with_identity_translator() {
    let (resolver, translator) = recording_resolver(RecordingTranslator::identity());
    let row = PeerRow::builder()
        .inet(columns::NATIVE_ADDRESS, v4(10, 0, 0, 5))
        .int(columns::NATIVE_PORT, 9042)
        .build();

    let endpoint = resolver
        .create(&row)
        .expect("modern row resolves")
        .expect("endpoint present");

    let expected = TranslateCall {
        address: v4(10, 0, 0, 5),
        port: Some(9042),
    };
    assert_eq!(endpoint.resolve(), addr("10.0.0.5:9042"));
    assert_eq!(translator.calls(), [expected]);
}

#[test]
fn legacy_row_is_rewritten_by_static_mapping() {
    let reachable = addr("203.0.113.9:9042");
    let mapping = StaticMappingTranslator::new(9042).with_mapping(v4(10, 0, 0, 9), reachable);
    let translator = RecordingTranslator::new(Arc::new(mapping));
    let (resolver, translator) = recording_resolver(translator);
    let row = PeerRow::builder()
        .inet(columns::PEER, v4(10, 0, 0, 9))
        .text("data_center", "dc1")
        .build();

    let endpoint = resolver
        .create(&row)
        .expect("legacy row resolves")
        .expect("endpoint present");

    let expected = TranslateCall {
        address: v4(10, 0, 0, 9),
        port: None,
    };
    assert_eq!(endpoint.resolve(), reachable);
    assert_eq!(translator.calls(), [expected]);
}

#[test]
fn legacy_row_with_null_peer_is_skipped() {
    let (resolver, translator) = recording_resolver(RecordingTranslator::identity());
    let row = PeerRow::builder().null(columns::PEER).build();

    assert_eq!(resolver.create(&row), Ok(None));
    assert_eq!(translator.call_count(), 0, "跳过的行不应触发转换");
}

#[test]
fn row_without_any_address_column_is_skipped() {
    let (resolver, translator) = recording_resolver(RecordingTranslator::identity());
    let row = PeerRow::builder().text("rack", "r1").build();

    assert_eq!(resolver.create(&row), Ok(None));
    assert_eq!(translator.call_count(), 0);
}

#[test]
fn loopback_peer_is_still_translated() {
    let (resolver, translator) = recording_resolver(RecordingTranslator::identity());
    let row = PeerRow::builder()
        .inet(columns::PEER, v4(127, 0, 0, 1))
        .build();

    let endpoint = resolver.create(&row).expect("resolve").expect("endpoint");
    assert_eq!(endpoint.resolve(), addr("127.0.0.1:9042"));
    assert_eq!(translator.call_count(), 1);
}

#[test]
#[should_panic(expected = "called before init")]
fn create_before_init_is_a_programming_error() {
    let resolver = DefaultEndpointResolver::new();
    let row = PeerRow::builder()
        .inet(columns::PEER, v4(10, 0, 0, 9))
        .build();
    let _ = resolver.create(&row);
}

#[test]
fn malformed_row_fails_only_itself() {
    let (resolver, translator) = recording_resolver(RecordingTranslator::identity());
    let rows = [
        PeerRow::builder()
            .inet(columns::NATIVE_ADDRESS, v4(10, 0, 0, 1))
            .int(columns::NATIVE_PORT, 9042)
            .build(),
        PeerRow::builder()
            .inet(columns::NATIVE_ADDRESS, v4(10, 0, 0, 2))
            .int(columns::NATIVE_PORT, 65_536)
            .build(),
        PeerRow::builder().null(columns::PEER).build(),
        PeerRow::builder()
            .inet(columns::PEER, v4(10, 0, 0, 4))
            .build(),
    ];

    let results = resolve_all(&resolver, &rows);

    assert_eq!(results.len(), 4);
    assert_eq!(
        results[0].as_ref().map(|ep| ep.map(|ep| ep.resolve())),
        Ok(Some(addr("10.0.0.1:9042")))
    );
    assert_eq!(
        results[1],
        Err(ResolveError::PortOutOfRange {
            column: columns::NATIVE_PORT.to_owned(),
            value: 65_536,
        })
    );
    assert_eq!(results[2], Ok(None));
    assert_eq!(
        results[3].as_ref().map(|ep| ep.map(|ep| ep.resolve())),
        Ok(Some(addr("10.0.0.4:9042")))
    );
    assert_eq!(translator.call_count(), 2, "仅成功解析的两行触发转换");
}

#[test]
fn wrongly_typed_port_is_a_hard_failure() {
    let context = ClusterContext::new(Arc::new(IdentityTranslator::default()));
    let resolver = DefaultEndpointResolver::with_context(Arc::new(context));
    let row = PeerRow::builder()
        .inet(columns::NATIVE_ADDRESS, v4(10, 0, 0, 5))
        .text(columns::NATIVE_PORT, "9042")
        .build();

    let err = resolver.create(&row).expect_err("text port must fail");
    assert_eq!(err.code(), codes::TYPE_MISMATCH);
    assert_eq!(err.column(), columns::NATIVE_PORT);
}

#[test]
fn null_native_port_never_reaches_the_translator() {
    let (resolver, translator) = recording_resolver(RecordingTranslator::identity());
    let row = PeerRow::builder()
        .inet(columns::NATIVE_ADDRESS, v4(10, 0, 0, 5))
        .null(columns::NATIVE_PORT)
        .build();

    let err = resolver.create(&row).expect_err("null port must fail");
    assert_eq!(err.code(), codes::NULL_VALUE);
    assert_eq!(err.column(), columns::NATIVE_PORT);
    assert_eq!(translator.call_count(), 0, "硬失败的行不应触发转换");
}

#[test]
fn init_rebinds_translation_policy() {
    let resolver = DefaultEndpointResolver::new();
    let row = PeerRow::builder()
        .inet(columns::PEER, v4(10, 0, 0, 9))
        .build();

    let identity = ClusterContext::new(Arc::new(IdentityTranslator::new(9042)));
    resolver.init(Arc::new(identity));
    let first = resolver.create(&row).expect("resolve").expect("endpoint");

    let reachable = addr("198.51.100.9:19042");
    let mapping = StaticMappingTranslator::new(9042).with_mapping(v4(10, 0, 0, 9), reachable);
    resolver.init(Arc::new(ClusterContext::new(Arc::new(mapping))));
    let second = resolver.create(&row).expect("resolve").expect("endpoint");

    assert_eq!(first.resolve(), addr("10.0.0.9:9042"));
    assert_eq!(second.resolve(), reachable);
}
