use crate::domain::model::{AstrologicalChart, Coordinates};
use crate::domain::ports::ChartProvider;
use crate::utils::error::{EngineError, Result};
use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDateTime, TimeZone};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChartRequest {
    datetime: String,
    latitude: f64,
    longitude: f64,
}

/// Remote chart service: `POST` a located moment, receive the chart JSON.
#[derive(Debug, Clone)]
pub struct HttpChartProvider {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpChartProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl ChartProvider for HttpChartProvider {
    async fn compute_chart(
        &self,
        civil_date_time: NaiveDateTime,
        timezone_offset: FixedOffset,
        coordinates: Coordinates,
    ) -> Result<AstrologicalChart> {
        let moment = timezone_offset
            .from_local_datetime(&civil_date_time)
            .single()
            .ok_or_else(|| EngineError::ProviderError {
                message: format!("{} has no single instant at {}", civil_date_time, timezone_offset),
            })?;

        let body = ChartRequest {
            datetime: moment.to_rfc3339(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Requesting chart for {} from {}", body.datetime, self.endpoint);
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(EngineError::ProviderError {
                message: format!("chart service returned status {}", response.status()),
            });
        }

        response
            .json::<AstrologicalChart>()
            .await
            .map_err(|e| EngineError::ProviderError {
                message: format!("undecodable chart payload: {}", e),
            })
    }
}

/// Always answers with the same chart.
#[derive(Debug, Clone, Copy)]
pub struct FixedChartProvider {
    chart: AstrologicalChart,
}

impl FixedChartProvider {
    pub fn new(chart: AstrologicalChart) -> Self {
        Self { chart }
    }
}

#[async_trait]
impl ChartProvider for FixedChartProvider {
    async fn compute_chart(
        &self,
        _civil_date_time: NaiveDateTime,
        _timezone_offset: FixedOffset,
        _coordinates: Coordinates,
    ) -> Result<AstrologicalChart> {
        Ok(self.chart)
    }
}
