use super::model::{Coordinate, RawTravelSpeedParams, SpeedUnit, TravelSpeedRequest};
use super::service::ServiceDefaults;
use crate::error::ValidationError;

/// 校验请求参数
///
/// 必填项按 session_id、latitude、longitude 的顺序检查，返回第一个错误。
/// 可选项（unit、max_speed）缺失或无法解析时回退到服务默认值，不报错。
pub fn validate(
    params: &RawTravelSpeedParams,
    defaults: &ServiceDefaults,
) -> Result<TravelSpeedRequest, ValidationError> {
    let session_id = match params.session_id.as_deref() {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => return Err(ValidationError::MissingField("session_id")),
    };

    let latitude = parse_required(params.latitude.as_deref(), "latitude")?;
    let longitude = parse_required(params.longitude.as_deref(), "longitude")?;
    let location = Coordinate::new(latitude, longitude)?;

    let unit = params
        .unit
        .as_deref()
        .and_then(|raw| raw.parse::<SpeedUnit>().ok())
        .unwrap_or(defaults.unit);

    let max_speed = params
        .max_speed
        .as_deref()
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(defaults.max_speed);

    Ok(TravelSpeedRequest {
        session_id,
        location,
        unit,
        max_speed,
    })
}

fn parse_required(raw: Option<&str>, field: &'static str) -> Result<f64, ValidationError> {
    raw.and_then(|v| v.parse::<f64>().ok())
        .ok_or(ValidationError::MalformedField(field))
}
