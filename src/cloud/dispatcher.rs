use crate::app_config::ClientConfig;
use crate::auth::TokenProvider;
use crate::error::CloudError;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const API_KEY_HEADER: &str = "x-api-key";

/// Sends authenticated requests to the cloud API and maps failures onto [`CloudError`].
///
/// The HTTP session is shared with the caller, a fresh token is requested for every call and
/// nothing is retried.
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    client: Client,
    config: Arc<ClientConfig>,
    token_provider: Arc<dyn TokenProvider>,
}

impl RequestDispatcher {
    pub fn new(client: Client, config: Arc<ClientConfig>, token_provider: Arc<dyn TokenProvider>) -> Self {
        RequestDispatcher {
            client,
            config,
            token_provider,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[instrument(skip(self, body, query))]
    pub async fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<Value, CloudError> {
        debug!(?body, ?query, "Sending {} to {}", method, endpoint);

        let token = self.token_provider.access_token().await.map_err(|e| {
            warn!(error = %e, "⚠️ Unable to obtain an access token");
            CloudError::from(e)
        })?;
        let headers = auth_headers(&token, self.config.api_key())?;

        let mut request = self.client.request(method, endpoint).headers(headers);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = %status, "Response status: {}", status);
        debug!(body = %text, "Response body");

        map_response(status, &text)
    }
}

fn auth_headers(token: &str, api_key: &str) -> Result<HeaderMap, CloudError> {
    let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token))?;
    authorization.set_sensitive(true);
    let mut api_key = HeaderValue::from_str(api_key)?;
    api_key.set_sensitive(true);

    let mut headers = HeaderMap::with_capacity(2);
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(API_KEY_HEADER, api_key);
    Ok(headers)
}

fn map_response(status: StatusCode, text: &str) -> Result<Value, CloudError> {
    if status == StatusCode::UNAUTHORIZED {
        let message = serde_json::from_str::<Value>(text)
            .ok()
            .and_then(|body| body.get("message")?.as_str().map(str::to_owned));
        warn!(status_code = %status, "⚠️ Access token rejected: {:?}", message);
        return Err(CloudError::auth(message));
    }

    if status.is_client_error() || status.is_server_error() {
        let body = error_body(text);
        warn!(status_code = %status, "⚠️ Request to the cloud API failed. Response: {:?}", body);
        return Err(if status.is_client_error() {
            CloudError::Request { status, body }
        } else {
            CloudError::Server { status, body }
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

fn error_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    serde_json::from_str(text).ok().or_else(|| Some(Value::String(text.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{StaticTokenProvider, TokenError};
    use async_trait::async_trait;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use test_log::test;

    fn dispatcher(server: &mockito::Server) -> RequestDispatcher {
        RequestDispatcher::new(
            Client::new(),
            Arc::new(ClientConfig::new("api-key").with_api_url(server.url())),
            Arc::new(StaticTokenProvider::new("token")),
        )
    }

    #[derive(Debug)]
    struct IdentityProviderDown {
        url: String,
    }

    #[async_trait]
    impl TokenProvider for IdentityProviderDown {
        async fn access_token(&self) -> Result<String, TokenError> {
            let token = reqwest::get(&self.url).await?.error_for_status()?.text().await?;
            Ok(token)
        }
    }

    #[test(tokio::test)]
    async fn dispatch_sends_credentials_body_and_query() -> Result<(), CloudError> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("PUT", "/devices/1/comfosys/settings")
            .match_header("authorization", "Bearer token")
            .match_header("x-api-key", "api-key")
            .match_query(Matcher::UrlEncoded("a".into(), "b c".into()))
            .match_body(Matcher::Json(json!({ "setVentilationPreset": { "value": 1 } })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result":"ok"}"#)
            .create_async()
            .await;

        let dispatcher = dispatcher(&server);
        let body = json!({ "setVentilationPreset": { "value": 1 } });
        let endpoint = dispatcher.config().endpoint("/devices/1/comfosys/settings");
        let result = dispatcher.dispatch(Method::PUT, &endpoint, Some(&body), &[("a", "b c".to_string())]).await?;

        mock.assert_async().await;
        assert_eq!(result, json!({ "result": "ok" }));

        Ok(())
    }

    #[rstest]
    #[case(Method::GET, "/devices/ids")]
    #[case(Method::PUT, "/scenes/1/activate/2")]
    #[case(Method::POST, "/anything")]
    #[case(Method::DELETE, "/anything")]
    #[tokio::test]
    async fn dispatch_maps_401_to_an_auth_error(#[case] method: Method, #[case] path: &str) {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock(method.as_str(), path)
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"statusCode":401,"message":"expired"}"#)
            .create_async()
            .await;

        let dispatcher = dispatcher(&server);
        let result = dispatcher.dispatch(method, &dispatcher.config().endpoint(path), None, &[]).await;

        match result {
            Err(CloudError::Auth { message, source: None }) => assert_eq!(message.as_deref(), Some("expired")),
            other => assert!(false, "Expected an auth error, found {:?}", other),
        }
    }

    #[test(tokio::test)]
    async fn dispatch_maps_401_without_message() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server.mock("GET", "/health").with_status(401).with_body("Unauthorized").create_async().await;

        let dispatcher = dispatcher(&server);
        let result = dispatcher.dispatch(Method::GET, &dispatcher.config().endpoint("/health"), None, &[]).await;

        assert!(matches!(result, Err(CloudError::Auth { message: None, source: None })));
    }

    #[test(tokio::test)]
    async fn dispatch_wraps_token_transport_errors_as_auth_errors() {
        let mut server = mockito::Server::new_async().await;

        let identity_mock = server.mock("GET", "/token").with_status(503).create_async().await;
        let api_mock = server.mock("GET", "/health").expect(0).create_async().await;

        let dispatcher = RequestDispatcher::new(
            Client::new(),
            Arc::new(ClientConfig::new("api-key").with_api_url(server.url())),
            Arc::new(IdentityProviderDown {
                url: format!("{}/token", server.url()),
            }),
        );
        let result = dispatcher.dispatch(Method::GET, &dispatcher.config().endpoint("/health"), None, &[]).await;

        identity_mock.assert_async().await;
        api_mock.assert_async().await;
        assert!(matches!(
            result,
            Err(CloudError::Auth {
                source: Some(TokenError::Transport(_)),
                ..
            })
        ));
    }

    #[rstest]
    #[case(400, r#"{"message":"invalid preset"}"#, Some(json!({ "message": "invalid preset" })))]
    #[case(404, "Not Found", Some(json!("Not Found")))]
    #[case(403, "", None)]
    #[tokio::test]
    async fn dispatch_maps_client_errors(#[case] status: usize, #[case] body: &str, #[case] expected: Option<Value>) {
        let mut server = mockito::Server::new_async().await;

        let _mock = server.mock("GET", "/scenes").with_status(status).with_body(body).create_async().await;

        let dispatcher = dispatcher(&server);
        let result = dispatcher.dispatch(Method::GET, &dispatcher.config().endpoint("/scenes"), None, &[]).await;

        match result {
            Err(CloudError::Request { status: actual, body }) => {
                assert_eq!(actual.as_u16() as usize, status);
                assert_eq!(body, expected);
            }
            other => assert!(false, "Expected a request error, found {:?}", other),
        }
    }

    #[test(tokio::test)]
    async fn dispatch_maps_server_errors() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("GET", "/health")
            .with_status(503)
            .with_body(r#"{"status":"unhealthy"}"#)
            .create_async()
            .await;

        let dispatcher = dispatcher(&server);
        let result = dispatcher.dispatch(Method::GET, &dispatcher.config().endpoint("/health"), None, &[]).await;

        match result {
            Err(CloudError::Server { status, body }) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, Some(json!({ "status": "unhealthy" })));
            }
            other => assert!(false, "Expected a server error, found {:?}", other),
        }
    }

    #[test(tokio::test)]
    async fn dispatch_returns_null_for_an_empty_body() -> Result<(), CloudError> {
        let mut server = mockito::Server::new_async().await;

        let _mock = server.mock("PUT", "/scenes/1/activate/2").with_status(204).create_async().await;

        let dispatcher = dispatcher(&server);
        let result = dispatcher
            .dispatch(Method::PUT, &dispatcher.config().endpoint("/scenes/1/activate/2"), None, &[])
            .await?;

        assert_eq!(result, Value::Null);

        Ok(())
    }

    #[test(tokio::test)]
    async fn dispatch_fails_on_malformed_json() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server.mock("GET", "/scenes").with_status(200).with_body("{not json").create_async().await;

        let dispatcher = dispatcher(&server);
        let result = dispatcher.dispatch(Method::GET, &dispatcher.config().endpoint("/scenes"), None, &[]).await;

        assert!(matches!(result, Err(CloudError::Decode(_))));
    }

    #[test(tokio::test)]
    async fn dispatch_fails_when_the_api_is_unreachable() {
        let dispatcher = RequestDispatcher::new(
            Client::new(),
            Arc::new(ClientConfig::new("api-key").with_api_url("http://127.0.0.1:1")),
            Arc::new(StaticTokenProvider::new("token")),
        );
        let result = dispatcher.dispatch(Method::GET, &dispatcher.config().endpoint("/health"), None, &[]).await;

        assert!(matches!(result, Err(CloudError::Http(_))));
    }

    #[test]
    fn auth_headers_rejects_invalid_tokens() {
        let result = auth_headers("line\nbreak", "api-key");

        assert!(matches!(result, Err(CloudError::InvalidHeaderValue(_))));
    }

    #[test]
    fn auth_headers_marks_credentials_sensitive() -> Result<(), CloudError> {
        let headers = auth_headers("token", "api-key")?;

        assert_eq!(headers[AUTHORIZATION], "Bearer token");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert!(headers[API_KEY_HEADER].is_sensitive());

        Ok(())
    }
}
