use super::model::{Coordinate, SpeedUnit};

/// 地球平均半径（公里）
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// 每英里对应的公里数
pub const KM_PER_MILE: f64 = 1.609344;

/// 使用 Haversine 公式计算两点间的球面距离
///
/// 默认单位为公里，`SpeedUnit::MilesPerHour` 时换算为英里。
pub fn distance(a: Coordinate, b: Coordinate, unit: SpeedUnit) -> f64 {
    let km = great_circle_km(a, b);
    match unit {
        SpeedUnit::KilometersPerHour => km,
        SpeedUnit::MilesPerHour => km / KM_PER_MILE,
    }
}

fn great_circle_km(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // 对跖点附近浮点误差可能使 h 略大于 1
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
