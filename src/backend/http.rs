//! Thin request helpers over gloo-net

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{BackendError, ErrorBody, Result, Service};

/// Send a request and turn any non-2xx status into a [`BackendError`].
pub async fn send(request: Request, service: Service) -> Result<Response> {
    let resp = request
        .send()
        .await
        .map_err(|e| BackendError::Network(e.to_string()))?;

    if !resp.ok() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        return Err(ErrorBody::parse(&text).into_error(status, service));
    }

    Ok(resp)
}

pub async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    resp.json::<T>()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

/// GET and decode a JSON body
pub async fn get_json<T: DeserializeOwned>(builder: RequestBuilder, service: Service) -> Result<T> {
    let request = builder
        .build()
        .map_err(|e| BackendError::Network(format!("Failed to build request: {}", e)))?;
    read_json(send(request, service).await?).await
}

/// POST a JSON body and decode a JSON response
pub async fn post_json<B, T>(builder: RequestBuilder, body: &B, service: Service) -> Result<T>
where
    B: Serialize,
    T: DeserializeOwned,
{
    read_json(send(with_body(builder, body)?, service).await?).await
}

/// POST a JSON body and ignore the response body
pub async fn post_empty<B: Serialize>(
    builder: RequestBuilder,
    body: &B,
    service: Service,
) -> Result<()> {
    send(with_body(builder, body)?, service).await.map(|_| ())
}

fn with_body<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Request> {
    builder
        .header("Content-Type", "application/json")
        .json(body)
        .map_err(|e| BackendError::Decode(format!("Failed to serialize request: {}", e)))
}

/// Send a request without a body and ignore the response body
pub async fn execute(builder: RequestBuilder, service: Service) -> Result<()> {
    let request = builder
        .build()
        .map_err(|e| BackendError::Network(format!("Failed to build request: {}", e)))?;
    send(request, service).await.map(|_| ())
}
