mod client;
mod dispatcher;
mod http_client;

pub use client::{DEFAULT_DEVICE_TYPE, ZehnderCloud};
pub use dispatcher::RequestDispatcher;
pub use http_client::new_client;
