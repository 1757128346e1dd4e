mod device_details;
mod device_id;
mod device_state;
mod history_query;

pub use device_details::DeviceDetails;
pub use device_id::DeviceId;
pub use device_state::DeviceState;
pub use history_query::{DEFAULT_INTERVAL, HistoryQuery, TIME_FORMAT};
