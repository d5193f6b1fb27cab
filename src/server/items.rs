use axum::{extract::Path, routing::get, Router};
use http::StatusCode;
use serde::Serialize;

use crate::{
    reply::{Envelope, EnvelopeError},
    request::RequestContext,
};

/// Ids above this don't exist.
const MAX_ITEM_ID: u64 = 1000;

#[derive(Serialize, Debug)]
pub struct Item {
    pub id: u64,
}

async fn get_item(
    request: RequestContext,
    Path(id): Path<u64>,
) -> Result<Envelope<Item>, EnvelopeError> {
    if id > MAX_ITEM_ID {
        return Err(EnvelopeError::new(
            request,
            StatusCode::NOT_FOUND,
            format!("item {id} not found"),
        ));
    }

    Ok(Envelope(Item { id }))
}

/// Reply with an error envelope using whatever status code was requested.
async fn fail(request: RequestContext, Path(code): Path<u16>) -> EnvelopeError {
    match StatusCode::from_u16(code) {
        Ok(status) if status.is_client_error() || status.is_server_error() => {
            EnvelopeError::new(request, status, "requested failure")
        }
        _ => EnvelopeError::new(
            request,
            StatusCode::BAD_REQUEST,
            format!("{code} is not an error status code"),
        ),
    }
}

pub fn create_routes() -> Router<()> {
    Router::new()
        .route("/items/:id", get(get_item))
        .route("/fail/:code", get(fail))
}
