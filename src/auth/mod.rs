pub mod oauth;
mod token_provider;

pub use token_provider::{StaticTokenProvider, TokenError, TokenProvider};
