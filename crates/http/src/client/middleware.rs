//! Request middleware chain

use super::ClientError;
use async_trait::async_trait;
use reqwest::{Client, Request, Response};
use std::sync::Arc;

/// A step in the request pipeline
///
/// Implementations may modify the request, call `next.run` any number of
/// times, and inspect or replace the response.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, ClientError>;
}

/// The remainder of the chain after the current middleware
///
/// Middlewares run in registration order; the transport runs last.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    client: &'a Client,
    middleware: &'a [Arc<dyn Middleware>],
}

impl<'a> Next<'a> {
    pub(crate) const fn new(client: &'a Client, middleware: &'a [Arc<dyn Middleware>]) -> Self {
        Self { client, middleware }
    }

    /// Pass the request to the rest of the chain
    pub async fn run(self, request: Request) -> Result<Response, ClientError> {
        match self.middleware.split_first() {
            Some((current, rest)) => {
                current
                    .handle(
                        request,
                        Next {
                            client: self.client,
                            middleware: rest,
                        },
                    )
                    .await
            }
            None => Ok(self.client.execute(request).await?),
        }
    }
}
