pub mod geo_speed;
