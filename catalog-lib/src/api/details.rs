//! Full-plot details for one item.

use std::future::Future;
use std::future::IntoFuture;
use std::pin::Pin;

use crate::CatalogClient;
use crate::error::Error;
use crate::model::Details;

use super::RequestKind;
use super::decode_details;

impl CatalogClient {
    /// Fetches full details for the item with the given id.
    pub fn details(&self, id: impl Into<String>) -> DetailsBuilder<'_> {
        DetailsBuilder {
            client: self,
            id: id.into(),
        }
    }
}

/// Builder for a details request.
pub struct DetailsBuilder<'a> {
    client: &'a CatalogClient,
    id: String,
}

impl<'a> DetailsBuilder<'a> {
    /// Execute the request.
    pub async fn execute(self) -> Result<Details, Error> {
        let params = vec![("i", self.id.clone()), ("plot", "full".to_string())];

        match self
            .client
            .lookup(RequestKind::Details, params, decode_details)
            .await
        {
            Ok(envelope) => envelope.into_result(),
            Err(e) => {
                log::warn!("details for {} failed: {}", self.id, e);
                Err(Error::Api(e))
            }
        }
    }
}

impl<'a> IntoFuture for DetailsBuilder<'a> {
    type Output = Result<Details, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}
