// HTTP contact provider - bridges ContactClient with the ContactSubmitter trait
use async_trait::async_trait;
use tourease_api::{ContactClient, ContactError};

use crate::{
    contact::{ContactForm, ContactSubmitter},
    Error, Result,
};

/// Wrapper around ContactClient that implements ContactSubmitter
pub struct HttpContactProvider {
    client: ContactClient,
}

impl HttpContactProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = ContactClient::with_base_url(base_url).map_err(api_error)?;
        Ok(Self { client })
    }

    pub fn from_client(client: ContactClient) -> Self {
        Self { client }
    }

    pub fn submit_url(&self) -> String {
        self.client.submit_url()
    }
}

#[async_trait]
impl ContactSubmitter for HttpContactProvider {
    async fn submit(&self, form: ContactForm) -> Result<Option<String>> {
        let ack = self
            .client
            .submit(&form.to_request())
            .await
            .map_err(api_error)?;
        Ok(ack.message)
    }
}

/// Map client errors onto the core taxonomy
fn api_error(err: ContactError) -> Error {
    match err {
        ContactError::Rejected(msg) => Error::ContactRejected(msg),
        ContactError::InvalidResponse(msg) => Error::ApiError(msg),
        ContactError::Network(e) => Error::NetworkError(e),
    }
}
