use chrono::{DateTime, Utc};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE, DATE};
use reqwest::{Client, Method, Request, Response, StatusCode, Url};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::vws_constant::*;
use crate::{
    format_date, AddTargetResponse, CanonicalRequest, NewTarget, ResultResponse, Signer,
    TargetListResponse, TargetRecordResponse, VwsConfig,
};

/// Client for one VWS target database.
#[derive(Debug, Clone)]
pub struct Vws {
    config: VwsConfig,
    client: Client,
}

impl Vws {
    #[inline]
    pub fn new(config: VwsConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    #[inline]
    pub fn with_client(config: VwsConfig, client: Client) -> Self {
        Self { config, client }
    }

    #[inline]
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(VwsConfig::from_env()?))
    }

    #[inline]
    pub fn config(&self) -> &VwsConfig {
        &self.config
    }

    /// Uploads a target and returns its id.
    ///
    /// A rejection by the service is logged and yields `None`; only transport
    /// and encoding failures are returned as errors.
    pub async fn add_target(&self, target: &NewTarget) -> Result<Option<String>> {
        match self.try_add_target(target).await {
            Ok(target_id) => Ok(Some(target_id)),
            Err(Error::Rejected { status, body }) => {
                warn!(%status, %body, name = target.name(), "failed to add target");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Uploads a target, surfacing a rejection as [`Error::Rejected`].
    pub async fn try_add_target(&self, target: &NewTarget) -> Result<String> {
        let url = self.targets_url(None)?;
        let req = self.prepare_request(Method::POST, url, Some(target.encode()?))?;
        let res: AddTargetResponse = self.send(req, StatusCode::CREATED).await?;
        info!(target_id = %res.target_id, "successfully added target");

        Ok(res.target_id)
    }

    #[inline]
    pub async fn get_target_record(&self, target_id: &str) -> Result<TargetRecordResponse> {
        let url = self.targets_url(Some(target_id))?;
        let req = self.prepare_request(Method::GET, url, None)?;
        self.send(req, StatusCode::OK).await
    }

    #[inline]
    pub async fn delete_target(&self, target_id: &str) -> Result<ResultResponse> {
        let url = self.targets_url(Some(target_id))?;
        let req = self.prepare_request(Method::DELETE, url, None)?;
        self.send(req, StatusCode::OK).await
    }

    #[inline]
    pub async fn list_all_targets(&self) -> Result<TargetListResponse> {
        let url = self.targets_url(None)?;
        let req = self.prepare_request(Method::GET, url, None)?;
        self.send(req, StatusCode::OK).await
    }

    /// Deletes every listed target, one request at a time, in listing order.
    ///
    /// Stops at the first failed deletion; targets before it stay deleted.
    pub async fn delete_all_targets(&self) -> Result<Vec<ResultResponse>> {
        let targets = self.list_all_targets().await?.results;
        let total = targets.len();

        let mut deleted = Vec::with_capacity(total);
        for (index, target_id) in targets.iter().enumerate() {
            deleted.push(self.delete_target(target_id).await?);
            info!(%target_id, "deleted target {} of {}", index + 1, total);
        }

        Ok(deleted)
    }

    /// `<base_url>/targets` or `<base_url>/targets/<id>`, keeping any path prefix of the
    /// base url. The id is percent-encoded as a single path segment.
    pub fn targets_url(&self, target_id: Option<&str>) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                Error::Config(format!("{} cannot be a base url", self.config.base_url))
            })?;
            segments.pop_if_empty().push(VWS_TARGETS_SEGMENT);
            if let Some(target_id) = target_id {
                if matches!(target_id, "" | "." | "..") {
                    return Err(Error::InvalidTargetId(target_id.to_string()));
                }
                segments.push(target_id);
            }
        }

        Ok(url)
    }

    #[inline]
    pub fn prepare_request(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Request> {
        self.prepare_request_at(method, url, body, Utc::now())
    }

    /// Builds a signed request dated `date`. Requests with a body are sent as JSON,
    /// requests without one carry an empty content type.
    pub fn prepare_request_at(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        date: DateTime<Utc>,
    ) -> Result<Request> {
        let mut req = Request::new(method, url);

        let content_type = match body {
            Some(body) => {
                *req.body_mut() = Some(body.into());
                VWS_JSON_CONTENT_TYPE
            }
            None => "",
        };

        let headers_mut = req.headers_mut();
        headers_mut.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers_mut.insert(DATE, HeaderValue::from_str(&format_date(date))?);

        let string_to_sign = req.string_to_sign();
        let authorization = self.signer().authorization(&string_to_sign)?;
        req.headers_mut()
            .insert(AUTHORIZATION, HeaderValue::from_str(&authorization)?);

        Ok(req)
    }

    async fn send<T: DeserializeOwned>(&self, req: Request, expected: StatusCode) -> Result<T> {
        debug!(method = %req.method(), path = req.url().path(), "sending vws request");
        let res = self.client.execute(req).await?;
        let res = check_status(res, expected).await?;
        let bytes = res.bytes().await?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    #[inline]
    fn signer(&self) -> Signer<'_> {
        Signer::new(&self.config.access_key, self.config.secret_key.expose_secret())
    }
}

async fn check_status(res: Response, expected: StatusCode) -> Result<Response> {
    let status = res.status();
    if status == expected {
        return Ok(res);
    }

    let body = res.text().await?;
    Err(Error::Rejected { status, body })
}
