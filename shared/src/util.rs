/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a snowflake-style i64 for use as an order/resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at café scale)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Build a prefixed order ID, e.g. `POS-1234567890` / `O-1234567890`.
///
/// The digits come from [`snowflake_id`], so ids are time-ordered and
/// collision-resistant without any central counter.
pub fn new_order_id(prefix: &str) -> String {
    format!("{}-{}", prefix, snowflake_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn snowflake_ids_are_monotonic_across_millis() {
        let a = snowflake_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = snowflake_id();
        assert!(b > a, "later id must sort after earlier id");
    }

    #[test]
    fn order_ids_carry_prefix() {
        let id = new_order_id("POS");
        assert!(id.starts_with("POS-"));
        assert!(id["POS-".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn order_ids_from_distinct_millis_never_collide() {
        // The timestamp component alone separates ids once the clock ticks
        let ids: HashSet<String> = (0..16)
            .map(|_| {
                std::thread::sleep(std::time::Duration::from_millis(2));
                new_order_id("O")
            })
            .collect();
        assert_eq!(ids.len(), 16);
    }
}
