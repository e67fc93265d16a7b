//! Movie catalog client methods

use super::{ClientError, VideoflixClient};
use crate::types::Movie;
use reqwest::Method;

impl VideoflixClient {
    /// List all movies
    pub async fn list_movies(&self) -> Result<Vec<Movie>, ClientError> {
        let req = self.request(Method::GET, self.urls().movies());
        self.execute(req).await
    }

    /// Get a single movie
    pub async fn get_movie(&self, id: u64) -> Result<Movie, ClientError> {
        let req = self.request(Method::GET, self.urls().movie(id));
        self.execute(req).await
    }
}
