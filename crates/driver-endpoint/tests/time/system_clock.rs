use std::time::{SystemTime, UNIX_EPOCH};

use driver_endpoint::TimeSource;
use driver_endpoint::time::SystemClock;

fn reference_millis() -> i64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("宿主墙钟应晚于纪元");
    i64::try_from(elapsed.as_millis()).expect("millis fit in i64")
}

#[test]
fn consecutive_reads_never_decrease() {
    let clock = SystemClock;
    let mut previous = clock.now_micros();
    for _ in 0..10_000 {
        let current = clock.now_micros();
        assert!(current >= previous, "时间回退：{previous} -> {current}");
        previous = current;
    }
}

#[test]
fn truncated_value_matches_reference_millisecond_clock() {
    let clock = SystemClock;
    for _ in 0..100 {
        let before = reference_millis();
        let micros = clock.now_micros();
        let after = reference_millis();

        assert_eq!(micros % 1000, 0, "默认实现只有毫秒精度");
        let millis = micros / 1000;
        assert!(
            before <= millis && millis <= after,
            "{millis} 不在参考区间 [{before}, {after}] 内"
        );
    }
}

#[test]
fn clock_is_shareable_across_threads() {
    let clock: std::sync::Arc<dyn TimeSource> = std::sync::Arc::new(SystemClock);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let clock = std::sync::Arc::clone(&clock);
            std::thread::spawn(move || clock.now_micros())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().expect("读线程不应 panic") > 0);
    }
}
