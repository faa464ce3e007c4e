use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;

/// 经纬度坐标（十进制度）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// 构造并校验坐标范围，纬度 [-90, 90]，经度 [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::MalformedField("latitude"));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::MalformedField("longitude"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// 速度单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedUnit {
    #[serde(rename = "km/h")]
    KilometersPerHour,
    #[serde(rename = "mph")]
    MilesPerHour,
}

impl SpeedUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedUnit::KilometersPerHour => "km/h",
            SpeedUnit::MilesPerHour => "mph",
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown speed unit '{0}', expected mph or km/h")]
pub struct UnknownSpeedUnit(pub String);

impl FromStr for SpeedUnit {
    type Err = UnknownSpeedUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("km/h") {
            Ok(SpeedUnit::KilometersPerHour)
        } else if trimmed.eq_ignore_ascii_case("mph") {
            Ok(SpeedUnit::MilesPerHour)
        } else {
            Err(UnknownSpeedUnit(s.to_string()))
        }
    }
}

// 原始查询参数，全部按字符串接收，由 validator 负责解析
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawTravelSpeedParams {
    pub session_id: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub unit: Option<String>,
    pub max_speed: Option<String>,
}

// 同名参数重复出现时取第一个值，未知参数忽略
impl FromIterator<(String, String)> for RawTravelSpeedParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut params = Self::default();
        for (key, value) in iter {
            let slot = match key.as_str() {
                "session_id" => &mut params.session_id,
                "latitude" => &mut params.latitude,
                "longitude" => &mut params.longitude,
                "unit" => &mut params.unit,
                "max_speed" => &mut params.max_speed,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// 校验后的请求
#[derive(Debug, Clone, PartialEq)]
pub struct TravelSpeedRequest {
    pub session_id: String,
    pub location: Coordinate,
    pub unit: SpeedUnit,
    pub max_speed: f64,
}

/// 接口响应
///
/// `speed` 为 `None` 表示零时间内发生了位移（瞬移），序列化为 `null`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelSpeedResult {
    pub speed: Option<f64>,
    pub unit: SpeedUnit,
    pub impossible_travel: bool,
}
