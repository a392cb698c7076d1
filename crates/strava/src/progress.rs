//! Client for the CommitPool backend: activity totals and user registry.

use async_trait::async_trait;
use log::debug;

use crate::http::{build_client, parse_response, request_error};
use crate::models::{ApiProgressResponse, RegisterUserRequest};
use commitpool_core::athletes::{ProgressSourceTrait, UserRegistryTrait};
use commitpool_core::errors::Result;

#[derive(Debug, Clone)]
pub struct ProgressApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProgressApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn activities_url(
        &self,
        start_time: u64,
        end_time: u64,
        activity_type: &str,
        access_token: &str,
    ) -> String {
        format!(
            "{}/activities?startTime={}&endTime={}&type={}&accessToken={}",
            self.base_url,
            start_time,
            end_time,
            urlencoding::encode(activity_type),
            urlencoding::encode(access_token),
        )
    }
}

#[async_trait]
impl ProgressSourceTrait for ProgressApiClient {
    async fn activity_total(
        &self,
        start_time: u64,
        end_time: u64,
        activity_type: &str,
        access_token: &str,
    ) -> Result<f64> {
        debug!(
            "[ProgressApi] GET {}/activities ({} {}..{})",
            self.base_url, activity_type, start_time, end_time
        );

        let url = self.activities_url(start_time, end_time, activity_type, access_token);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(request_error)?;

        let progress: ApiProgressResponse = parse_response(response).await?;
        Ok(progress.total)
    }
}

#[async_trait]
impl UserRegistryTrait for ProgressApiClient {
    async fn register_user(&self, address: &str, token: &str) -> Result<()> {
        let url = format!("{}/user", self.base_url);
        debug!("[ProgressApi] POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&RegisterUserRequest { address, token })
            .send()
            .await
            .map_err(request_error)?;

        parse_response::<serde_json::Value>(response).await?;
        Ok(())
    }
}
