//! Async client for the Zehnder cloud API, which controls ComfoAir ventilation units and other
//! connected Zehnder devices.
//!
//! ```no_run
//! use std::sync::Arc;
//! use zehnder_cloud::auth::StaticTokenProvider;
//! use zehnder_cloud::{ClientConfig, ZehnderCloud, new_client};
//!
//! # async fn example() -> Result<(), zehnder_cloud::CloudError> {
//! let cloud = ZehnderCloud::new(
//!     new_client()?,
//!     ClientConfig::new("subscription-key"),
//!     Arc::new(StaticTokenProvider::new("bearer-token")),
//! );
//!
//! for device in cloud.get_devices().await? {
//!     let state = cloud.get_device_state(&device).await?;
//!     println!("{}: {:?}", device, state.value("indoorTemp"));
//! }
//! # Ok(())
//! # }
//! ```

mod app_config;
pub mod auth;
mod cloud;
pub mod domain;
mod error;

pub use app_config::{API_ENDPOINT, ClientConfig};
pub use cloud::{DEFAULT_DEVICE_TYPE, RequestDispatcher, ZehnderCloud, new_client};
pub use domain::{DeviceDetails, DeviceId, DeviceState, HistoryQuery};
pub use error::CloudError;
