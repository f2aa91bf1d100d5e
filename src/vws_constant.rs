pub const VWS_BASE_URL: &str = "https://vws.vuforia.com";
pub const VWS_TARGETS_SEGMENT: &str = "targets";
pub const VWS_AUTH_SCHEME: &str = "VWS";
pub const VWS_JSON_CONTENT_TYPE: &str = "application/json";
pub const VWS_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

pub const VWS_ACCESS_KEY_ENV: &str = "VWS_ACCESS_KEY";
pub const VWS_SECRET_KEY_ENV: &str = "VWS_SECRET_KEY";
pub const VWS_BASE_URL_ENV: &str = "VWS_BASE_URL";
