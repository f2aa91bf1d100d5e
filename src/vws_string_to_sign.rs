use chrono::{DateTime, Utc};
use reqwest::header::{CONTENT_TYPE, DATE};
use reqwest::Request;

use crate::vws_constant::VWS_DATE_FORMAT;

pub trait CanonicalRequest {
    fn payload_md5(&self) -> String;
    fn content_type(&self) -> &str;
    fn date(&self) -> &str;
    fn string_to_sign(&self) -> String;
}

impl CanonicalRequest for Request {
    fn payload_md5(&self) -> String {
        let body = self.body().map(|b| b.as_bytes());
        let payload = if let Some(Some(payload)) = body {
            payload
        } else {
            b""
        };

        hex::encode(md5::compute(payload).0)
    }

    fn content_type(&self) -> &str {
        self.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    fn date(&self) -> &str {
        self.headers()
            .get(DATE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    fn string_to_sign(&self) -> String {
        format!(
            "{method}\n{md5}\n{content_type}\n{date}\n{path}",
            method = self.method().as_str(),
            md5 = self.payload_md5(),
            content_type = self.content_type(),
            date = self.date(),
            path = self.url().path(),
        )
    }
}

#[inline]
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format(VWS_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use reqwest::{Body, Method, Url};

    use super::*;

    fn request(method: Method, path: &str, body: Option<&'static [u8]>) -> Request {
        let url = Url::parse(&format!("https://vws.vuforia.com{}", path)).unwrap();
        let mut req = Request::new(method, url);
        if let Some(body) = body {
            *req.body_mut() = Some(Body::from(body));
        }
        req
    }

    #[test]
    fn date_is_rfc1123_gmt() {
        let date = Utc.with_ymd_and_hms(2017, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(format_date(date), "Thu, 09 Mar 2017 07:05:01 GMT");
    }

    #[test]
    fn empty_body_uses_md5_of_zero_length_input() {
        let req = request(Method::GET, "/targets", None);
        assert_eq!(req.payload_md5(), "d41d8cd98f00b204e9800998ecf8427e");

        let req = request(Method::DELETE, "/targets/abc", Some(b""));
        assert_eq!(req.payload_md5(), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn string_to_sign_layout() {
        let mut req = request(Method::POST, "/targets", Some(b"{}"));
        let headers = req.headers_mut();
        headers.insert(CONTENT_TYPE, "application/json".parse().unwrap());
        headers.insert(DATE, "Thu, 09 Mar 2017 07:05:01 GMT".parse().unwrap());

        assert_eq!(
            req.string_to_sign(),
            "POST\n99914b932bd37a50b983c5e7c90ae93b\napplication/json\nThu, 09 Mar 2017 07:05:01 GMT\n/targets"
        );
    }

    #[test]
    fn missing_content_type_signs_as_empty() {
        let mut req = request(Method::GET, "/targets/abc", None);
        req.headers_mut()
            .insert(DATE, "Thu, 09 Mar 2017 07:05:01 GMT".parse().unwrap());

        assert_eq!(
            req.string_to_sign(),
            "GET\nd41d8cd98f00b204e9800998ecf8427e\n\nThu, 09 Mar 2017 07:05:01 GMT\n/targets/abc"
        );
    }
}
