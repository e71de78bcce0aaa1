//! Extractors that reject with the JSON error body.

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Query string extractor; malformed values become a 400 `AppError`.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// JSON body extractor; missing fields, bad syntax and wrong content type
/// all become a 400 `AppError`.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Limit {
        limit: Option<usize>,
    }

    #[tokio::test]
    async fn test_query_rejection_is_bad_request() {
        let (mut parts, _) = HttpRequest::builder()
            .uri("/events?limit=-1")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        let result = ApiQuery::<Limit>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_query_accepts_valid_values() {
        let (mut parts, _) = HttpRequest::builder()
            .uri("/events?limit=5")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        let ApiQuery(query) = ApiQuery::<Limit>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(query.limit, Some(5));
    }

    #[tokio::test]
    async fn test_json_missing_field_is_bad_request() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Event {
            event: String,
        }

        let req = HttpRequest::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"page":"x"}"#))
            .unwrap();

        let result = ApiJson::<Event>::from_request(req, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
