//! Online provider shell for the ipinfo.io API.

use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::countries::{alpha2_to_code, CountryCode};
use crate::errors::TopographerError;
use crate::http::ResilientClient;
use crate::provider::{Provider, ProviderLookupResult};

const PROVIDER_NAME: &str = "ipinfo";
const DEFAULT_BASE_URL: &str = "https://ipinfo.io";

#[derive(Debug, Deserialize)]
struct IpinfoResponse {
    #[serde(default)]
    country: String,
    #[serde(default)]
    city: String,
}

/// Thin shell over `GET https://ipinfo.io/{ip}`.
#[derive(Debug)]
pub struct IpinfoProvider {
    http: Arc<ResilientClient>,
    auth_token: String,
    base_url: String,
}

impl IpinfoProvider {
    /// Creates the shell. The API is useless without a token, so a missing
    /// or empty one fails construction (and thereby topographer init).
    pub fn new(http: Arc<ResilientClient>, auth_token: Option<String>) -> Result<Self> {
        let auth_token = auth_token
            .filter(|token| !token.is_empty())
            .ok_or(TopographerError::AuthTokenRequired)
            .context("cannot create ipinfo provider")?;

        Ok(IpinfoProvider {
            http,
            auth_token,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Points the shell at a different endpoint; used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn parse(&self, payload: IpinfoResponse) -> ProviderLookupResult {
        let country_code = if payload.country.is_empty() {
            CountryCode::UNKNOWN
        } else {
            alpha2_to_code(&payload.country)
        };

        ProviderLookupResult {
            country_code,
            city: payload.city,
        }
    }
}

#[async_trait]
impl Provider for IpinfoProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn lookup(&self, ip: IpAddr) -> Result<ProviderLookupResult> {
        let url = format!("{}/{ip}", self.base_url);
        let request = self
            .http
            .request(reqwest::Method::GET, &url)
            .bearer_auth(&self.auth_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .build()
            .context("cannot build a lookup request")?;

        let response = self
            .http
            .execute(request, &CancellationToken::new())
            .await
            .context("cannot query ipinfo")?;

        let payload: IpinfoResponse = response
            .json()
            .await
            .context("cannot parse an ipinfo response")?;

        Ok(self.parse(payload))
    }
}
