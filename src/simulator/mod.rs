/// Series simulator: deterministic synthetic order sequences.
///
/// Every sequence is a pure function of a caller-built seed key such as
/// `"country:Turkey|month:Oca"`. The same key yields the same sequence on
/// every call and every platform, so charts stay stable across renders.

pub mod economics;

use crate::models::fixture::DailyOrder;
use crate::models::series::DailyOrderPair;

/// FNV-1a offset basis.
const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
/// FNV-1a prime.
const FNV_PRIME: u32 = 16_777_619;

/// Hash a seed key into a non-negative 32-bit seed.
///
/// FNV-1a over UTF-16 code units with a signed 32-bit accumulator; the
/// result is the absolute value of that accumulator. An empty key never
/// touches the accumulator and hashes to the raw offset basis.
pub fn hash_str(key: &str) -> u32 {
    let mut units = key.encode_utf16().peekable();
    if units.peek().is_none() {
        return FNV_OFFSET_BASIS;
    }
    let mut h = FNV_OFFSET_BASIS as i32;
    for unit in units {
        h ^= i32::from(unit);
        h = h.wrapping_mul(FNV_PRIME as i32);
    }
    h.unsigned_abs()
}

/// Map a sinusoid into [0, 1].
fn unit_wave(x: f64) -> f64 {
    (x + 1.0) / 2.0
}

/// 30 days of synthetic orders, `day` "01".."30", `value` in [2, 5].
pub fn daily_orders_30(seed_key: &str) -> Vec<DailyOrder> {
    const MIN: f64 = 2.0;
    const MAX: f64 = 5.0;
    let seed = f64::from(hash_str(seed_key));

    (1..=30)
        .map(|day| {
            let d = f64::from(day);
            let r1 = unit_wave((seed + d * 13.37).sin());
            let r2 = unit_wave((seed * 0.7 + d * 7.77).cos());
            let value = (MIN + (r1 * 0.6 + r2 * 0.4) * (MAX - MIN)).round() as i64;
            DailyOrder { day: format!("{:02}", day), value }
        })
        .collect()
}

/// 180 days of synthetic orders and production, `day` "1".."180".
///
/// Orders fall in [1, 8]; production is derived from the same day's orders
/// (`orders * 1.2` plus up to 3 extra units from an independent tap).
pub fn daily_orders_180(seed_key: &str) -> Vec<DailyOrderPair> {
    const MIN_ORDERS: f64 = 1.0;
    const MAX_ORDERS: f64 = 8.0;
    let seed = f64::from(hash_str(seed_key));

    (1..=180)
        .map(|day| {
            let d = f64::from(day);
            let r1 = unit_wave((seed + d * 0.5).sin());
            let r2 = unit_wave((seed * 0.3 + d * 0.2).cos());
            let orders =
                (MIN_ORDERS + (r1 * 0.7 + r2 * 0.3) * (MAX_ORDERS - MIN_ORDERS)).round() as i64;

            let p1 = unit_wave((seed * 2.0 + d * 0.4).sin());
            let production = (orders as f64 * 1.2 + p1 * 3.0).round() as i64;

            DailyOrderPair { day: day.to_string(), orders, production }
        })
        .collect()
}

/// Sum of a 30-day order sequence.
pub fn total_orders(series: &[DailyOrder]) -> i64 {
    series.iter().map(|d| d.value).sum()
}
