//! The `Fetch` seam between dataset stores and their remote source.
//!
//! Stores depend on this trait, not on `ApiClient`, so any async closure
//! returning records can stand in for the server.

use std::future::Future;
use std::marker::PhantomData;

use futures::future::{BoxFuture, FutureExt};
use serde::de::DeserializeOwned;

use super::{ApiClient, ApiError};

/// One network round trip producing a dataset's full collection.
///
/// Implementations must return an error rather than a partial or malformed
/// collection on transport or status failure.
pub trait Fetch<R>: Send + Sync {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<R>, ApiError>>;
}

impl<R, F, Fut> Fetch<R> for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<R>, ApiError>> + Send + 'static,
{
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<R>, ApiError>> {
        (self)().boxed()
    }
}

/// How a resource encodes its records on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// A JSON array of records
    Collection,
    /// A single JSON object, held as a one-element collection
    Single,
}

/// A dataset resource on the property search server.
#[derive(Debug, Clone)]
pub struct Endpoint<R> {
    client: ApiClient,
    path: &'static str,
    payload: Payload,
    _record: PhantomData<fn() -> R>,
}

impl<R> Endpoint<R> {
    pub fn new(client: ApiClient, path: &'static str, payload: Payload) -> Self {
        Self {
            client,
            path,
            payload,
            _record: PhantomData,
        }
    }

    pub fn collection(client: ApiClient, path: &'static str) -> Self {
        Self::new(client, path, Payload::Collection)
    }

    pub fn single(client: ApiClient, path: &'static str) -> Self {
        Self::new(client, path, Payload::Single)
    }

    pub fn path(&self) -> &'static str {
        self.path
    }
}

impl<R> Fetch<R> for Endpoint<R>
where
    R: DeserializeOwned + Send + 'static,
{
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<R>, ApiError>> {
        async move {
            match self.payload {
                Payload::Collection => self.client.get::<Vec<R>>(self.path).await,
                Payload::Single => self.client.get::<R>(self.path).await.map(|r| vec![r]),
            }
        }
        .boxed()
    }
}
