use crate::error::HandlerError;
use crate::files::FileStore;
use crate::http::request::{Method, Request};
use crate::http::response::Response;

pub fn root() -> Response {
    Response::ok()
}

/// Reflects the final path segment as plain text.
pub fn echo(req: &Request) -> Response {
    Response::text(req.last_path_segment())
}

/// Reflects the `User-Agent` header, or an empty body when absent.
pub fn user_agent(req: &Request) -> Response {
    Response::text(req.header("User-Agent").unwrap_or_default())
}

/// GET serves a file, POST stores the request body. Anything else is 405.
pub async fn files(store: Option<&dyn FileStore>, req: &Request) -> Result<Response, HandlerError> {
    match req.method {
        Method::GET => get_file(store, req).await,
        Method::POST => post_file(store, req).await,
        Method::Other(_) => Err(HandlerError::MethodNotAllowed),
    }
}

async fn get_file(store: Option<&dyn FileStore>, req: &Request) -> Result<Response, HandlerError> {
    let store = store.ok_or(HandlerError::MissingConfiguration)?;
    let name = file_name(req)?;

    if !store.exists(name).await {
        return Err(HandlerError::NotFound);
    }

    let contents = store.read(name).await?;
    Ok(Response::octet_stream(contents))
}

async fn post_file(store: Option<&dyn FileStore>, req: &Request) -> Result<Response, HandlerError> {
    let store = store.ok_or(HandlerError::MissingConfiguration)?;
    let name = file_name(req)?;

    store.write(name, &req.body).await?;
    tracing::debug!(file = name, bytes = req.body.len(), "Stored file");
    Ok(Response::created())
}

fn file_name(req: &Request) -> Result<&str, HandlerError> {
    match req.last_path_segment() {
        "" | "." | ".." => Err(HandlerError::NotFound),
        name => Ok(name),
    }
}
