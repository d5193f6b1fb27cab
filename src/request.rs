use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts};
use http::{request::Parts, Method, Request, Uri};

/// The parts of the incoming request that are recorded when a fatal error is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: Method,
    pub uri: Uri,
}

impl RequestContext {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri }
    }
}

impl From<&Parts> for RequestContext {
    fn from(parts: &Parts) -> Self {
        Self::new(parts.method.clone(), parts.uri.clone())
    }
}

impl<B> From<&Request<B>> for RequestContext {
    fn from(request: &Request<B>) -> Self {
        Self::new(request.method().clone(), request.uri().clone())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestContext::from(&*parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/items/5?verbose=true")
            .body(())
            .unwrap();

        let context = RequestContext::from(&request);
        assert_eq!(context.method, Method::POST);
        assert_eq!(context.uri.path(), "/items/5");
        assert_eq!(context.uri.to_string(), "/items/5?verbose=true");
    }

    #[tokio::test]
    async fn extractor() {
        let (mut parts, _) = Request::builder()
            .method(Method::DELETE)
            .uri("/items/7")
            .body(())
            .unwrap()
            .into_parts();

        let context = RequestContext::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(context, RequestContext::new(Method::DELETE, Uri::from_static("/items/7")));
    }
}
