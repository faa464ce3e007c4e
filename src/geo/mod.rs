// 异地登录速度检测
// 参数校验 -> 会话查询 -> 球面距离 -> 速度判定

pub mod geodesy;
pub mod model;
pub mod service;
pub mod speed;
pub mod validator;

pub use model::{Coordinate, RawTravelSpeedParams, SpeedUnit, TravelSpeedRequest, TravelSpeedResult};
pub use service::{ServiceDefaults, TravelSpeedService};
pub use speed::TravelSpeed;
