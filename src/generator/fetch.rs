use std::time::Duration;

use crate::error::FetchError;

#[cfg(feature = "network")]
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "network")]
impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("raqim/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if status.is_success() {
            Ok(response.text()?)
        } else {
            Err(FetchError::Status(status.as_u16()))
        }
    }
}

#[cfg(not(feature = "network"))]
pub struct HttpClient;

#[cfg(not(feature = "network"))]
impl HttpClient {
    pub fn new(_timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self)
    }

    pub fn get_text(&self, _url: &str) -> Result<String, FetchError> {
        Err(FetchError::Disabled)
    }
}
