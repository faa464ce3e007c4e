use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    error::GeoSpeedError,
    geo::{RawTravelSpeedParams, TravelSpeedResult},
};

// 查询串按键值对接收，重复参数不会被提取器拒绝
// 示例请求:
// /geo-speed?session_id=65dea6f4-5d15-4e61-9eb7-f30190c0b2e2&unit=km/h&max_speed=805.00&latitude=48.183085&longitude=12.035587
#[axum::debug_handler]
pub async fn get_geo_speed(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<TravelSpeedResult>, GeoSpeedError> {
    let params: RawTravelSpeedParams = pairs.into_iter().collect();

    match state.service.evaluate(&params).await {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            match &err {
                GeoSpeedError::Validation(e) => tracing::warn!("bad request: {}", e),
                GeoSpeedError::SessionNotFound(id) => {
                    tracing::warn!("session not found: {}", id)
                }
                GeoSpeedError::Store(e) => tracing::error!("session lookup failed: {}", e),
            }
            Err(err)
        }
    }
}
