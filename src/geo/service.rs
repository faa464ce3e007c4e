use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::model::{RawTravelSpeedParams, SpeedUnit, TravelSpeedResult};
use super::{geodesy, speed, validator};
use crate::error::GeoSpeedError;
use crate::session::SessionStore;

/// 服务级默认值，启动时由配置确定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceDefaults {
    pub unit: SpeedUnit,
    pub max_speed: f64,
}

/// 异地移动速度检测服务
///
/// 除启动时的默认值与会话存储引用外不持有状态，可在并发请求间共享。
pub struct TravelSpeedService {
    store: Arc<dyn SessionStore>,
    defaults: ServiceDefaults,
}

impl TravelSpeedService {
    pub fn new(store: Arc<dyn SessionStore>, defaults: ServiceDefaults) -> Self {
        Self { store, defaults }
    }

    pub fn defaults(&self) -> &ServiceDefaults {
        &self.defaults
    }

    pub async fn evaluate(
        &self,
        params: &RawTravelSpeedParams,
    ) -> Result<TravelSpeedResult, GeoSpeedError> {
        self.evaluate_at(params, Utc::now()).await
    }

    /// 以 `now` 作为结束时间进行计算
    pub async fn evaluate_at(
        &self,
        params: &RawTravelSpeedParams,
        now: DateTime<Utc>,
    ) -> Result<TravelSpeedResult, GeoSpeedError> {
        let request = validator::validate(params, &self.defaults)?;

        let session = self
            .store
            .get_session(&request.session_id)
            .await?
            .ok_or_else(|| GeoSpeedError::SessionNotFound(request.session_id.clone()))?;

        let distance =
            geodesy::distance(session.last_known_location, request.location, request.unit);
        let travel_speed = speed::speed(distance, session.authenticated_at, now);
        let impossible_travel = speed::is_implausible(travel_speed, request.max_speed);

        tracing::debug!(
            session_id = %request.session_id,
            distance,
            speed = ?travel_speed,
            unit = %request.unit,
            max_speed = request.max_speed,
            impossible_travel,
            "evaluated travel speed"
        );

        Ok(TravelSpeedResult {
            speed: travel_speed.value(),
            unit: request.unit,
            impossible_travel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, ValidationError};
    use crate::session::{DEMO_SESSION_ID, InMemorySessionStore, SessionRecord};
    use async_trait::async_trait;

    const DEFAULTS: ServiceDefaults = ServiceDefaults {
        unit: SpeedUnit::KilometersPerHour,
        max_speed: 880.0,
    };

    fn service_at(now: DateTime<Utc>) -> TravelSpeedService {
        let store: InMemorySessionStore = [SessionRecord::demo(now)].into_iter().collect();
        TravelSpeedService::new(Arc::new(store), DEFAULTS)
    }

    fn params(latitude: &str, longitude: &str) -> RawTravelSpeedParams {
        RawTravelSpeedParams {
            session_id: Some(DEMO_SESSION_ID.to_string()),
            latitude: Some(latitude.to_string()),
            longitude: Some(longitude.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn los_angeles_to_new_york_in_two_hours_is_impossible() {
        let now = Utc::now();
        let result = service_at(now)
            .evaluate_at(&params("40.700583", "-74.004531"), now)
            .await
            .unwrap();

        let speed = result.speed.unwrap();
        assert!((speed - 1969.2945286592947).abs() < 1e-6, "got {}", speed);
        assert_eq!(result.unit, SpeedUnit::KilometersPerHour);
        assert!(result.impossible_travel);
    }

    #[tokio::test]
    async fn same_location_is_stationary() {
        let now = Utc::now();
        let result = service_at(now)
            .evaluate_at(&params("34.026437", "-118.26109"), now)
            .await
            .unwrap();

        assert_eq!(result.speed, Some(0.0));
        assert!(!result.impossible_travel);
    }

    #[tokio::test]
    async fn phoenix_in_mph_with_custom_threshold() {
        let now = Utc::now();
        let mut raw = params("33.418222", "-112.073945");
        raw.unit = Some("mph".into());
        raw.max_speed = Some("547".into());

        let result = service_at(now).evaluate_at(&raw, now).await.unwrap();
        assert_eq!(result.unit, SpeedUnit::MilesPerHour);
        assert!((result.speed.unwrap() - 178.98896197618484).abs() < 1e-6);
        assert!(!result.impossible_travel);
    }

    #[tokio::test]
    async fn zero_elapsed_time_with_movement_is_impossible() {
        let now = Utc::now();
        let mut record = SessionRecord::demo(now);
        record.authenticated_at = now;
        let store: InMemorySessionStore = [record].into_iter().collect();
        let service = TravelSpeedService::new(Arc::new(store), DEFAULTS);

        let result = service
            .evaluate_at(&params("34.1", "-118.2"), now)
            .await
            .unwrap();
        assert_eq!(result.speed, None);
        assert!(result.impossible_travel);
    }

    #[tokio::test]
    async fn validation_failure_is_propagated() {
        let now = Utc::now();
        let mut raw = params("34.0", "-118.0");
        raw.latitude = None;

        let err = service_at(now).evaluate_at(&raw, now).await.unwrap_err();
        assert!(matches!(
            err,
            GeoSpeedError::Validation(ValidationError::MalformedField("latitude"))
        ));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let now = Utc::now();
        let mut raw = params("34.0", "-118.0");
        raw.session_id = Some("no-such-session".into());

        let err = service_at(now).evaluate_at(&raw, now).await.unwrap_err();
        assert!(matches!(err, GeoSpeedError::SessionNotFound(id) if id == "no-such-session"));
    }

    struct BrokenStore;

    #[async_trait]
    impl SessionStore for BrokenStore {
        async fn get_session(&self, _id: &str) -> Result<Option<SessionRecord>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[tokio::test]
    async fn store_failure_is_propagated() {
        let service = TravelSpeedService::new(Arc::new(BrokenStore), DEFAULTS);
        let err = service.evaluate(&params("34.0", "-118.0")).await.unwrap_err();
        assert!(matches!(err, GeoSpeedError::Store(StoreError::Unavailable(_))));
    }

    #[test]
    fn defaults_are_exposed() {
        let service = TravelSpeedService::new(Arc::new(InMemorySessionStore::new()), DEFAULTS);
        assert_eq!(service.defaults(), &DEFAULTS);
    }
}
