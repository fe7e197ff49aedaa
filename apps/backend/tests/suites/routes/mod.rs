pub mod games_http;
pub mod healthcheck;
pub mod validated_json;
