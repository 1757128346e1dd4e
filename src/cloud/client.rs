use crate::app_config::ClientConfig;
use crate::auth::TokenProvider;
use crate::cloud::dispatcher::RequestDispatcher;
use crate::domain::{DeviceDetails, DeviceId, DeviceState, HistoryQuery};
use crate::error::CloudError;
use chrono::Local;
use reqwest::{Client, Method};
use serde_json::Value;
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_DEVICE_TYPE: &str = "comfosys";

/// Client for the Zehnder cloud API.
///
/// Cloning is cheap; clones share the HTTP session, configuration and token provider, so a
/// single client can serve concurrent tasks.
#[derive(Debug, Clone)]
pub struct ZehnderCloud {
    dispatcher: RequestDispatcher,
}

impl ZehnderCloud {
    pub fn new(client: Client, config: ClientConfig, token_provider: Arc<dyn TokenProvider>) -> Self {
        ZehnderCloud {
            dispatcher: RequestDispatcher::new(client, Arc::new(config), token_provider),
        }
    }

    pub fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatcher
    }

    /// Returns the ids of all devices of the current customer.
    pub async fn get_devices(&self) -> Result<Vec<DeviceId>, CloudError> {
        let result = self.get("/devices/ids").await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Current state of a device as name-value pairs.
    ///
    /// Works for all devices like radiators, ComfoAir units or non-Zehnder (external) devices.
    pub async fn get_device_state(&self, device_id: impl Display) -> Result<DeviceState, CloudError> {
        let result = self.get(&format!("/devices/{}/state", device_id)).await?;
        Ok(DeviceState::new(result))
    }

    /// Details of a device including notifications, orders, properties and errors.
    pub async fn get_device_details(&self, device_id: impl Display) -> Result<DeviceDetails, CloudError> {
        let result = self.get(&format!("/devices/byid/{}/details", device_id)).await?;
        Ok(DeviceDetails::new(result))
    }

    /// History of a single value. Open bounds of `query` are resolved against the current time.
    pub async fn get_device_history(&self, device_id: impl Display, query: &HistoryQuery) -> Result<Value, CloudError> {
        let params = query.query_params(Local::now().fixed_offset());
        let endpoint = self.dispatcher.config().endpoint(&format!("/devices/{}/history/", device_id));
        self.dispatcher.dispatch(Method::GET, &endpoint, None, &params).await
    }

    /// Changes the settings of a device, `device_type` defaults to [`DEFAULT_DEVICE_TYPE`].
    pub async fn set_device_settings(
        &self,
        device_id: impl Display,
        settings: &Value,
        device_type: Option<&str>,
    ) -> Result<Value, CloudError> {
        let device_type = device_type.unwrap_or(DEFAULT_DEVICE_TYPE);
        let endpoint = self.dispatcher.config().endpoint(&format!("/devices/{}/{}/settings", device_id, device_type));
        self.dispatcher.dispatch(Method::PUT, &endpoint, Some(settings), &[]).await
    }

    pub async fn activate_scene(&self, building_id: impl Display, scene_id: impl Display) -> Result<Value, CloudError> {
        let endpoint = self.dispatcher.config().endpoint(&format!("/scenes/{}/activate/{}", building_id, scene_id));
        self.dispatcher.dispatch(Method::PUT, &endpoint, None, &[]).await
    }

    /// All supported scenes.
    pub async fn get_scenes(&self) -> Result<Value, CloudError> {
        self.get("/scenes").await
    }

    /// Indication of the health of the API.
    pub async fn get_health(&self) -> Result<Value, CloudError> {
        self.get("/health").await
    }

    /// Current weather data at the location of a device.
    pub async fn get_weather_data(&self, device_id: impl Display) -> Result<Value, CloudError> {
        self.get(&format!("/devices/{}/weather", device_id)).await
    }

    /// Not offered by the API yet; fails without sending a request.
    pub async fn get_weather_forecast(&self, customer_oid: &str, language: &str) -> Result<Value, CloudError> {
        debug!(customer_oid, language, "Weather forecast requested");
        Err(CloudError::NotImplemented {
            operation: "weather forecast",
        })
    }

    /// Not offered by the API yet; fails without sending a request.
    pub async fn get_weather_history(
        &self,
        device_id: impl Display,
        value_name: &str,
        from: &str,
        to: &str,
        interval: &str,
    ) -> Result<Value, CloudError> {
        debug!(%device_id, value_name, from, to, interval, "Weather history requested");
        Err(CloudError::NotImplemented {
            operation: "weather history",
        })
    }

    async fn get(&self, path: &str) -> Result<Value, CloudError> {
        let endpoint = self.dispatcher.config().endpoint(path);
        self.dispatcher.dispatch(Method::GET, &endpoint, None, &[]).await
    }
}
