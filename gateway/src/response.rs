use axum::response::IntoResponse;
use bytes::Bytes;
use cidgate_castore::nodeservice::BlobReader;
use cidgate_castore::Node;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use http::{HeaderMap, HeaderValue, StatusCode};
use std::fmt;
use std::io;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use crate::path::ContentPath;
use crate::{directory, mime, Error};

/// Everything served under a [cidgate_castore::Cid] is immutable.
const IMMUTABLE: &str = "public, max-age=29030400, immutable";

/// The body of a [GatewayResponse].
pub enum Body {
    Empty,
    Full(Bytes),
    /// Pulled from the backend as it's consumed. It can be consumed only once,
    /// and dropping it releases the underlying reader.
    Stream(BoxStream<'static, io::Result<Bytes>>),
}

impl Body {
    /// Reads the whole body into memory.
    pub async fn collect(self) -> io::Result<Bytes> {
        match self {
            Body::Empty => Ok(Bytes::new()),
            Body::Full(bytes) => Ok(bytes),
            Body::Stream(s) => {
                let chunks: Vec<Bytes> = s.try_collect().await?;
                Ok(chunks.concat().into())
            }
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Empty"),
            Body::Full(bytes) => f.debug_tuple("Full").field(&bytes.len()).finish(),
            Body::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// The outcome of resolving a request path.
///
/// It's built once per request, and only taken apart again by the HTTP
/// layer. If it was produced from an [Error], that error is kept around for
/// logging.
#[derive(Debug)]
pub struct GatewayResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Body,
    error: Option<Error>,
}

impl GatewayResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    pub fn into_parts(self) -> (StatusCode, HeaderMap, Body) {
        (self.status, self.headers, self.body)
    }

    pub(crate) fn redirect(location: HeaderValue) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, location);

        Self {
            status: StatusCode::FOUND,
            headers,
            body: Body::Empty,
            error: None,
        }
    }

    pub(crate) fn html(document: String) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(document.len()));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(IMMUTABLE));

        Self {
            status: StatusCode::OK,
            headers,
            body: Body::Full(document.into()),
            error: None,
        }
    }

    fn file(reader: Box<dyn BlobReader>, size: u64, path: &ContentPath) -> Self {
        let media_type = mime::classify(
            &path
                .file_name()
                .map(|name| name.to_string())
                .unwrap_or_default(),
        );

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, media_type.to_header_value());
        headers.insert(CONTENT_LENGTH, HeaderValue::from(size));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(IMMUTABLE));

        Self {
            status: StatusCode::OK,
            headers,
            body: Body::Stream(ReaderStream::new(reader).boxed()),
            error: None,
        }
    }
}

/// Turns the result of resolving `path` into a [GatewayResponse].
/// Files are served with their content type, directories are handed to
/// [directory::respond], errors to [from_error].
pub fn build(resolved: Result<Node, Error>, path: &ContentPath) -> GatewayResponse {
    match resolved {
        Ok(Node::File { reader, size }) => GatewayResponse::file(reader, size, path),
        Ok(Node::Directory(dir)) => directory::respond(&dir, path),
        Err(e) => from_error(e),
    }
}

/// Maps an [Error] to the status code it's served with. The body is empty.
pub fn from_error(error: Error) -> GatewayResponse {
    let status = match error {
        Error::InvalidPath { .. } => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    GatewayResponse {
        status,
        headers: HeaderMap::new(),
        body: Body::Empty,
        error: Some(error),
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> axum::response::Response {
        match &self.error {
            Some(e @ Error::Backend(_)) => warn!(err=%e, "failed to resolve"),
            Some(e) => debug!(err=%e, "rejected request"),
            None => {}
        }

        let (status, headers, body) = self.into_parts();
        let body = match body {
            Body::Empty => axum::body::Body::empty(),
            Body::Full(bytes) => axum::body::Body::from(bytes),
            Body::Stream(s) => axum::body::Body::from_stream(s),
        };

        (status, headers, body).into_response()
    }
}
