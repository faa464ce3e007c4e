use chrono::{DateTime, TimeDelta, Utc};

const MICROS_PER_HOUR: f64 = 3_600_000_000.0;

/// 推算出的移动速度
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TravelSpeed {
    /// 正常速度，单位与距离单位一致（每小时）
    Measured(f64),
    /// 零时间内发生了非零位移
    Instantaneous,
}

impl TravelSpeed {
    pub fn value(&self) -> Option<f64> {
        match self {
            TravelSpeed::Measured(v) => Some(*v),
            TravelSpeed::Instantaneous => None,
        }
    }
}

/// 根据距离和起止时间计算速度
///
/// 取时间差的绝对值，起止时间顺序颠倒不影响结果。
/// 时间差为零时：距离为零返回 0，否则返回 `Instantaneous`。
pub fn speed(distance: f64, begin: DateTime<Utc>, end: DateTime<Utc>) -> TravelSpeed {
    let hours = elapsed_hours((end - begin).abs());
    if hours == 0.0 {
        if distance == 0.0 {
            TravelSpeed::Measured(0.0)
        } else {
            TravelSpeed::Instantaneous
        }
    } else {
        TravelSpeed::Measured(distance / hours)
    }
}

/// 速度严格大于阈值时判定为不可能的移动
pub fn is_implausible(speed: TravelSpeed, threshold: f64) -> bool {
    match speed {
        TravelSpeed::Measured(v) => v > threshold,
        TravelSpeed::Instantaneous => true,
    }
}

fn elapsed_hours(elapsed: TimeDelta) -> f64 {
    match elapsed.num_microseconds() {
        Some(micros) => micros as f64 / MICROS_PER_HOUR,
        // 超出微秒表示范围（约 29 万年），退化为秒精度
        None => elapsed.num_seconds() as f64 / 3600.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn speed_is_distance_over_hours() {
        let begin = base_time();
        let end = begin + TimeDelta::hours(2);
        assert_eq!(
            speed(3938.5890573185893, begin, end),
            TravelSpeed::Measured(3938.5890573185893 / 2.0)
        );

        let end = begin + TimeDelta::minutes(30);
        assert_eq!(speed(10.0, begin, end), TravelSpeed::Measured(20.0));
    }

    #[test]
    fn speed_ignores_time_order() {
        let t1 = base_time();
        let t2 = t1 + TimeDelta::minutes(95);
        assert_eq!(speed(123.4, t1, t2), speed(123.4, t2, t1));
    }

    #[test]
    fn zero_elapsed_zero_distance_is_stationary() {
        let t = base_time();
        assert_eq!(speed(0.0, t, t), TravelSpeed::Measured(0.0));
        assert!(!is_implausible(speed(0.0, t, t), 0.0));
    }

    #[test]
    fn zero_elapsed_with_distance_is_instantaneous() {
        let t = base_time();
        let s = speed(0.5, t, t);
        assert_eq!(s, TravelSpeed::Instantaneous);
        assert_eq!(s.value(), None);
        assert!(is_implausible(s, f64::MAX));
    }

    #[test]
    fn implausible_is_strictly_greater() {
        assert!(is_implausible(TravelSpeed::Measured(880.1), 880.0));
        assert!(!is_implausible(TravelSpeed::Measured(880.0), 880.0));
        assert!(!is_implausible(TravelSpeed::Measured(100.0), 880.0));
    }
}
