use crate::error::CloudError;
use reqwest::Client;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds a pooled HTTP session suitable for sharing between clients and tasks.
pub fn new_client() -> Result<Client, CloudError> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(client)
}
