//! Runtime configuration.
//!
//! The guide endpoint comes from the first CLI argument, then the
//! `EPG_API_URL` environment variable, then a built-in default. The API key
//! is only ever read from `EPG_API_KEY`; when unset, requests go out without
//! the key header and the console shows a warning.

use std::env;

const DEFAULT_GUIDE_URL: &str =
    "http://tgv2env-env-test.eba-9wibqvvm.eu-west-2.elasticbeanstalk.com/allEpg";

#[derive(Debug, Clone)]
pub struct Config {
    pub guide_url: String,
    pub api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let guide_url = env::args()
            .nth(1)
            .or_else(|| env::var("EPG_API_URL").ok())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_GUIDE_URL.to_string());

        let api_key = env::var("EPG_API_KEY").ok().filter(|key| !key.is_empty());

        Self { guide_url, api_key }
    }
}
