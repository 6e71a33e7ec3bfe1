// SPDX-License-Identifier: Apache-2.0

use crate::api::{DeviceUpdate, Platform, PlatformResult};
use crate::error::{PlatformError, PlatformErrorCode};
use crate::registry::ApiCredential;
use crate::retry::{BackoffPolicy, RetryPolicy};
use async_trait::async_trait;
use netswap_model::{
    Device, DeviceStatusRecord, Network, NetworkId, OrgId, Organization, RadioSettings, Serial,
    SwitchPort,
};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::warn;

/// HTTP client bound to one organization's credential. Carries a fixed
/// request timeout; rate-limited responses are retried within the policy
/// budget before surfacing.
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
    credential: ApiCredential,
    retry: RetryPolicy,
}

impl DashboardClient {
    pub fn new(
        base_url: &str,
        credential: ApiCredential,
        timeout: Duration,
    ) -> PlatformResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlatformError::transport(format!("http client build failed: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
            retry: RetryPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> PlatformResult<reqwest::Response> {
        let url = format!("{}{path}", self.base_url);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut request = self
                .http
                .request(method.clone(), &url)
                .header("Authorization", format!("Bearer {}", self.credential.reveal()));
            if let Some(payload) = &body {
                request = request.json(payload);
            }
            let response = request
                .send()
                .await
                .map_err(|e| PlatformError::transport(e.to_string()))?;
            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS && attempt < self.retry.max_attempts {
                let delay = self.retry.delay_for_attempt(attempt);
                warn!(%url, attempt, "platform rate limited request, backing off");
                tokio::time::sleep(delay).await;
                continue;
            }
            if status.is_success() {
                return Ok(response);
            }
            return Err(error_from_response(status, response).await);
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> PlatformResult<T> {
        let response = self.execute(Method::GET, path, None).await?;
        decode_body(response).await
    }
}

async fn decode_body<T: DeserializeOwned>(response: reqwest::Response) -> PlatformResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| PlatformError::new(PlatformErrorCode::Api, format!("invalid response body: {e}")))
}

async fn error_from_response(status: StatusCode, response: reqwest::Response) -> PlatformError {
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body)
        .unwrap_or_else(|| format!("platform returned {}", status.as_u16()));
    let code = match status {
        StatusCode::NOT_FOUND => PlatformErrorCode::NotFound,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PlatformErrorCode::Forbidden,
        StatusCode::TOO_MANY_REQUESTS => PlatformErrorCode::RateLimited,
        _ if message.to_ascii_lowercase().contains("already claimed") => {
            PlatformErrorCode::Conflict
        }
        _ => PlatformErrorCode::Api,
    };
    PlatformError::new(code, message)
}

/// The platform reports failures as `{"errors": ["...", ...]}`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let errors = value.get("errors")?.as_array()?;
    let joined = errors
        .iter()
        .filter_map(Value::as_str)
        .collect::<Vec<_>>()
        .join("; ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

#[async_trait]
impl Platform for DashboardClient {
    async fn get_organization(&self, org: &OrgId) -> PlatformResult<Organization> {
        self.get_json(&format!("/organizations/{org}")).await
    }

    async fn list_networks(&self, org: &OrgId) -> PlatformResult<Vec<Network>> {
        self.get_json(&format!("/organizations/{org}/networks")).await
    }

    async fn get_device(&self, network: &NetworkId, serial: &Serial) -> PlatformResult<Device> {
        self.get_json(&format!("/networks/{network}/devices/{serial}"))
            .await
    }

    async fn list_inventory(&self, org: &OrgId) -> PlatformResult<Vec<Device>> {
        self.get_json(&format!("/organizations/{org}/inventory/devices"))
            .await
    }

    async fn get_device_statuses(&self, org: &OrgId) -> PlatformResult<Vec<DeviceStatusRecord>> {
        self.get_json(&format!("/organizations/{org}/devices/statuses"))
            .await
    }

    async fn claim_device(&self, network: &NetworkId, serial: &Serial) -> PlatformResult<()> {
        self.execute(
            Method::POST,
            &format!("/networks/{network}/devices/claim"),
            Some(json!({ "serials": [serial.as_str()] })),
        )
        .await?;
        Ok(())
    }

    async fn update_device(
        &self,
        network: &NetworkId,
        serial: &Serial,
        update: &DeviceUpdate,
    ) -> PlatformResult<Device> {
        let payload = serde_json::to_value(update)
            .map_err(|e| PlatformError::new(PlatformErrorCode::Api, e.to_string()))?;
        let response = self
            .execute(
                Method::PUT,
                &format!("/networks/{network}/devices/{serial}"),
                Some(payload),
            )
            .await?;
        decode_body(response).await
    }

    async fn remove_device(&self, network: &NetworkId, serial: &Serial) -> PlatformResult<()> {
        self.execute(
            Method::POST,
            &format!("/networks/{network}/devices/remove"),
            Some(json!({ "serial": serial.as_str() })),
        )
        .await?;
        Ok(())
    }

    async fn get_radio_settings(&self, serial: &Serial) -> PlatformResult<RadioSettings> {
        self.get_json(&format!("/devices/{serial}/wireless/radio/settings"))
            .await
    }

    async fn put_radio_settings(
        &self,
        serial: &Serial,
        settings: &RadioSettings,
    ) -> PlatformResult<()> {
        self.execute(
            Method::PUT,
            &format!("/devices/{serial}/wireless/radio/settings"),
            Some(settings.as_value().clone()),
        )
        .await?;
        Ok(())
    }

    async fn list_switch_ports(&self, serial: &Serial) -> PlatformResult<Vec<SwitchPort>> {
        self.get_json(&format!("/devices/{serial}/switch/ports")).await
    }

    async fn put_switch_port_config(
        &self,
        serial: &Serial,
        port_id: &str,
        config: &Value,
    ) -> PlatformResult<()> {
        self.execute(
            Method::PUT,
            &format!("/devices/{serial}/switch/ports/{port_id}"),
            Some(config.clone()),
        )
        .await?;
        Ok(())
    }
}
