//! Identity provider settings of the vendor's Azure AD B2C tenant.
//!
//! The client never talks to the identity provider itself. These values are meant for
//! [`TokenProvider`](super::TokenProvider) implementations that run the OAuth2 flow.

pub const TENANT: &str = "zehndergroupauth";
pub const POLICY: &str = "B2C_1_signin_signup_enduser";

pub const AUTHORITY: &str = "https://zehndergroupauth.b2clogin.com/zehndergroupauth.onmicrosoft.com/B2C_1_signin_signup_enduser";
pub const AUTHORIZE_URL: &str =
    "https://zehndergroupauth.b2clogin.com/zehndergroupauth.onmicrosoft.com/B2C_1_signin_signup_enduser/oauth2/v2.0/authorize";
pub const TOKEN_URL: &str =
    "https://zehndergroupauth.b2clogin.com/zehndergroupauth.onmicrosoft.com/B2C_1_signin_signup_enduser/oauth2/v2.0/token";

/// Public client registered for the API documentation. It doubles as the requested scope.
pub const CLIENT_ID: &str = "df77b1ce-c368-4f7f-b0e6-c1406ac6bac9";

pub const REDIRECT_PORT: u16 = 5000;
pub const REDIRECT_URL: &str = "http://localhost:5000";
