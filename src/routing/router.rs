use std::path::PathBuf;
use std::sync::Arc;

use crate::files::{DirectoryStore, FileStore};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::routing::handlers;

/// Which handler a path belongs to.
///
/// Matching is by substring, checked in declaration order, so
/// `/foo/files/bar` is a file route and `/files/user-agent` is too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Files,
    UserAgent,
    Echo,
    NotFound,
}

impl Route {
    pub fn resolve(path: &str) -> Self {
        if path == "/" {
            Route::Root
        } else if path.contains("/files/") {
            Route::Files
        } else if path.contains("/user-agent") {
            Route::UserAgent
        } else if path.contains("/echo/") {
            Route::Echo
        } else {
            Route::NotFound
        }
    }
}

/// Dispatches requests to handlers.
///
/// Cloning is cheap; the listener hands one clone to every connection task.
#[derive(Clone)]
pub struct Router {
    files: Option<Arc<dyn FileStore>>,
}

impl Router {
    /// File routes are served from `directory`, or answer 404 when it is `None`.
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self {
            files: directory.map(|dir| Arc::new(DirectoryStore::new(dir)) as Arc<dyn FileStore>),
        }
    }

    pub fn with_store(files: Option<Arc<dyn FileStore>>) -> Self {
        Self { files }
    }

    pub fn has_file_store(&self) -> bool {
        self.files.is_some()
    }

    pub async fn route(&self, req: &Request) -> Response {
        let route = Route::resolve(&req.path);
        tracing::debug!(?route, method = req.method.as_str(), path = %req.path, "Routing request");

        let result = match route {
            Route::Root => Ok(handlers::root()),
            Route::Files => handlers::files(self.files.as_deref(), req).await,
            Route::UserAgent => Ok(handlers::user_agent(req)),
            Route::Echo => Ok(handlers::echo(req)),
            Route::NotFound => Ok(Response::not_found()),
        };

        result.unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                method = req.method.as_str(),
                path = %req.path,
                "Handler failed"
            );
            Response::empty(e.status())
        })
    }
}
