//! Serves the fixture trees through [crate::get_response] and the router,
//! the way a client would see them.

use async_trait::async_trait;
use axum::body::to_bytes;
use bytes::Bytes;
use cidgate_castore::fixtures::{
    put_flat_directory, BLOB_B, DUMMY_CID, HOLMES_TXT_CONTENTS, INDEX_HTML_CONTENTS,
    PP_TXT_CONTENTS, TESTFILE_CONTENTS, TEST_FOLDER, TEST_MIME_TYPES, TEST_SITE,
};
use cidgate_castore::nodeservice::{BlobReader, MemoryNodeService, NodeService};
use cidgate_castore::{Cid, Directory, Node, PathComponent};
use futures::StreamExt;
use http::{Request, StatusCode};
use rstest::rstest;
use std::io::{self, Cursor};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};
use tower::ServiceExt;

use crate::{gen_router, get_response, AppState, Body, Error, GatewayResponse};

/// A backend that fails every lookup.
struct FailingNodeService;

#[async_trait]
impl NodeService for FailingNodeService {
    async fn get_node(&self, _address: &Cid) -> Result<Option<Node>, cidgate_castore::Error> {
        Err(cidgate_castore::Error::StorageError("unavailable".into()))
    }
}

/// A reader over [BLOB_B] that raises a flag once it's dropped.
struct DropFlagReader {
    inner: Cursor<Bytes>,
    dropped: Arc<AtomicBool>,
}

impl AsyncRead for DropFlagReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl BlobReader for DropFlagReader {}

impl Drop for DropFlagReader {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

/// A backend where every address is a file with the contents of [BLOB_B],
/// read through a [DropFlagReader] sharing the flag.
struct FileNodeService {
    dropped: Arc<AtomicBool>,
}

#[async_trait]
impl NodeService for FileNodeService {
    async fn get_node(&self, _address: &Cid) -> Result<Option<Node>, cidgate_castore::Error> {
        Ok(Some(Node::File {
            reader: Box::new(DropFlagReader {
                inner: Cursor::new(BLOB_B.clone()),
                dropped: self.dropped.clone(),
            }),
            size: BLOB_B.len() as u64,
        }))
    }
}

/// The fixture trees, each as its own root.
struct Fixtures {
    svc: MemoryNodeService,
    testfile: Cid,
    folder: Cid,
    site: Cid,
    mime_types: Cid,
}

fn fixtures() -> Fixtures {
    let svc = MemoryNodeService::default();
    let testfile = svc.put_blob(TESTFILE_CONTENTS);
    let folder = put_flat_directory(&svc, TEST_FOLDER);
    let site = put_flat_directory(&svc, TEST_SITE);
    let mime_types = put_flat_directory(&svc, TEST_MIME_TYPES);

    Fixtures {
        svc,
        testfile,
        folder,
        site,
        mime_types,
    }
}

async fn body_of(resp: GatewayResponse) -> Vec<u8> {
    resp.into_body()
        .collect()
        .await
        .expect("body must be readable")
        .to_vec()
}

#[tokio::test]
async fn single_file() {
    let f = fixtures();

    let resp = get_response(&f.svc, &format!("/ipfs/{}", f.testfile)).await;

    assert_eq!(StatusCode::OK, resp.status());
    assert_eq!(
        "application/octet-stream",
        resp.headers()["content-type"].to_str().unwrap()
    );
    assert_eq!(TESTFILE_CONTENTS, body_of(resp).await);
}

#[tokio::test]
async fn directory_listing() {
    let f = fixtures();

    let resp = get_response(&f.svc, &format!("/ipfs/{}", f.folder)).await;

    assert_eq!(StatusCode::OK, resp.status());
    assert_eq!(
        "text/html",
        resp.headers()["content-type"].to_str().unwrap()
    );

    let body = String::from_utf8(body_of(resp).await).unwrap();
    assert!(body.contains("<html>"));
    for (name, _) in TEST_FOLDER {
        assert_eq!(1, body.matches(name).count(), "{} must be listed once", name);
    }
}

#[rstest]
#[case::pp("pp.txt", PP_TXT_CONTENTS)]
#[case::holmes("holmes.txt", HOLMES_TXT_CONTENTS)]
#[tokio::test]
async fn file_in_directory(#[case] name: &str, #[case] exp_contents: &[u8]) {
    let f = fixtures();

    let resp = get_response(&f.svc, &format!("/ipfs/{}/{}", f.folder, name)).await;

    assert_eq!(StatusCode::OK, resp.status());
    assert_eq!(
        "text/plain; charset=utf-8",
        resp.headers()["content-type"].to_str().unwrap()
    );
    assert_eq!(
        exp_contents.len().to_string(),
        resp.headers()["content-length"].to_str().unwrap()
    );
    assert_eq!(exp_contents, body_of(resp).await);
}

#[rstest]
#[case::plain("")]
#[case::trailing_slash("/")]
#[tokio::test]
async fn site_redirects_to_index(#[case] suffix: &str) {
    let f = fixtures();

    let resp = get_response(&f.svc, &format!("/ipfs/{}{}", f.site, suffix)).await;

    assert_eq!(StatusCode::FOUND, resp.status());
    assert_eq!(
        format!("/ipfs/{}/index.html", f.site),
        resp.headers()["location"].to_str().unwrap()
    );
    assert!(body_of(resp).await.is_empty());
}

#[tokio::test]
async fn site_index_itself() {
    let f = fixtures();

    let resp = get_response(&f.svc, &format!("/ipfs/{}/index.html", f.site)).await;

    assert_eq!(StatusCode::OK, resp.status());
    assert_eq!(
        "text/html; charset=utf-8",
        resp.headers()["content-type"].to_str().unwrap()
    );
    assert_eq!(INDEX_HTML_CONTENTS, body_of(resp).await);
}

#[rstest]
#[case::jpg("cat.jpg", "image/jpeg")]
#[case::svg("hexagons.svg", "image/svg+xml")]
#[case::svg_xml("hexagons-xml.svg", "image/svg+xml")]
#[case::txt("pp.txt", "text/plain; charset=utf-8")]
#[case::html("index.html", "text/html; charset=utf-8")]
#[tokio::test]
async fn mime_types(#[case] name: &str, #[case] exp_content_type: &str) {
    let f = fixtures();

    let resp = get_response(&f.svc, &format!("/ipfs/{}/{}", f.mime_types, name)).await;

    assert_eq!(StatusCode::OK, resp.status());
    assert_eq!(
        exp_content_type,
        resp.headers()["content-type"].to_str().unwrap()
    );
}

#[tokio::test]
async fn nested_directories() {
    let f = fixtures();

    let mut root = Directory::new();
    root.add("folder".try_into().unwrap(), f.folder.clone())
        .unwrap();
    root.add("site".try_into().unwrap(), f.site.clone()).unwrap();
    let root = f.svc.put_directory(root);

    let resp = get_response(&f.svc, &format!("/ipfs/{}/folder/holmes.txt", root)).await;
    assert_eq!(StatusCode::OK, resp.status());
    assert_eq!(HOLMES_TXT_CONTENTS, body_of(resp).await);

    let resp = get_response(&f.svc, &format!("/ipfs/{}/site", root)).await;
    assert_eq!(StatusCode::FOUND, resp.status());
    assert_eq!(
        format!("/ipfs/{}/site/index.html", root),
        resp.headers()["location"].to_str().unwrap()
    );
}

#[tokio::test]
async fn not_found() {
    let f = fixtures();

    for path in [
        format!("/ipfs/{}", *DUMMY_CID),
        format!("/ipfs/{}/missing.txt", f.folder),
        format!("/ipfs/{}/PP.TXT", f.folder),
        format!("/ipfs/{}/pp.txt/deeper", f.folder),
        format!("/ipfs/{}/anything", f.testfile),
    ] {
        let resp = get_response(&f.svc, &path).await;

        assert_eq!(StatusCode::NOT_FOUND, resp.status(), "{}", path);
        assert_eq!(Some(&Error::NotFound(path.clone())), resp.error());
        assert!(body_of(resp).await.is_empty());
    }
}

#[rstest]
#[case::no_prefix("/foo/bar")]
#[case::empty_root("/ipfs/")]
#[case::parent("/ipfs/QmFoo/../bar")]
#[case::current("/ipfs/QmFoo/./bar")]
#[tokio::test]
async fn invalid_path(#[case] path: &str) {
    let f = fixtures();

    let resp = get_response(&f.svc, path).await;

    assert_eq!(StatusCode::BAD_REQUEST, resp.status());
    assert!(matches!(resp.error(), Some(Error::InvalidPath { .. })));
}

#[tokio::test]
async fn backend_failure() {
    let resp = get_response(&FailingNodeService, &format!("/ipfs/{}", *DUMMY_CID)).await;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, resp.status());
    assert!(matches!(resp.error(), Some(Error::Backend(_))));
}

#[tokio::test]
async fn idempotent() {
    let f = fixtures();
    let path = format!("/ipfs/{}/pp.txt", f.folder);

    let first = get_response(&f.svc, &path).await;
    let second = get_response(&f.svc, &path).await;

    assert_eq!(first.status(), second.status());
    assert_eq!(first.headers(), second.headers());
    assert_eq!(body_of(first).await, body_of(second).await);
}

#[rstest]
#[case::root("/", StatusCode::OK)]
#[case::file("/ipfs/{folder}/pp.txt", StatusCode::OK)]
#[case::site("/ipfs/{site}", StatusCode::FOUND)]
#[case::missing("/ipfs/{folder}/void", StatusCode::NOT_FOUND)]
#[case::unrouted("/nope", StatusCode::NOT_FOUND)]
#[tokio::test]
async fn router(#[case] uri: &str, #[case] exp_status: StatusCode) {
    let f = fixtures();
    let uri = uri
        .replace("{folder}", f.folder.as_str())
        .replace("{site}", f.site.as_str());

    let app = gen_router().with_state(AppState::new(Arc::new(f.svc.clone())));

    let resp = app
        .oneshot(Request::get(uri).body(axum::body::Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(exp_status, resp.status());
}

#[tokio::test]
async fn router_streams_file() {
    let f = fixtures();
    let app = gen_router().with_state(AppState::new(Arc::new(f.svc.clone())));

    let resp = app
        .oneshot(
            Request::get(format!("/ipfs/{}/holmes.txt", f.folder))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(StatusCode::OK, resp.status());
    assert_eq!(
        "public, max-age=29030400, immutable",
        resp.headers()["cache-control"].to_str().unwrap()
    );

    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(HOLMES_TXT_CONTENTS, &body[..]);
}

#[tokio::test]
async fn dropping_stream_releases_reader() {
    let dropped = Arc::new(AtomicBool::new(false));
    let svc = FileNodeService {
        dropped: dropped.clone(),
    };

    let resp = get_response(&svc, "/ipfs/QmFile").await;
    assert_eq!(StatusCode::OK, resp.status());

    let Body::Stream(mut stream) = resp.into_body() else {
        panic!("expected a streaming body");
    };

    let chunk = stream
        .next()
        .await
        .expect("must yield a chunk")
        .expect("must read");
    assert!(!chunk.is_empty());
    assert!(chunk.len() < BLOB_B.len(), "must not have read everything");
    assert!(!dropped.load(Ordering::SeqCst));

    drop(stream);
    assert!(dropped.load(Ordering::SeqCst));
}

#[tokio::test]
async fn descending_into_file_releases_reader() {
    let dropped = Arc::new(AtomicBool::new(false));
    let svc = FileNodeService {
        dropped: dropped.clone(),
    };

    let resp = get_response(&svc, "/ipfs/QmFile/x").await;

    assert_eq!(StatusCode::NOT_FOUND, resp.status());
    assert!(dropped.load(Ordering::SeqCst));
}

/// Entry names are listed once each, even when they're plain alphanumerics.
#[tokio::test]
async fn listing_alphanumeric_names() {
    let svc = MemoryNodeService::default();
    let root = put_flat_directory(
        &svc,
        &[("README", PP_TXT_CONTENTS), ("docs", HOLMES_TXT_CONTENTS)],
    );

    let resp = get_response(&svc, &format!("/ipfs/{}", root)).await;
    assert_eq!(StatusCode::OK, resp.status());

    let body = String::from_utf8(body_of(resp).await).unwrap();
    assert_eq!(2, body.matches("<li>").count());
    assert_eq!(1, body.matches("README").count(), "{}", body);
    assert_eq!(1, body.matches("docs").count(), "{}", body);
}

/// Names that aren't valid UTF-8 can be requested percent-encoded.
#[tokio::test]
async fn non_utf8_entry_name() {
    let svc = MemoryNodeService::default();

    let mut root = Directory::new();
    root.add(
        PathComponent::try_from(&b"caf\xe9.txt"[..]).unwrap(),
        svc.put_blob(PP_TXT_CONTENTS),
    )
    .unwrap();
    let root = svc.put_directory(root);

    let resp = get_response(&svc, &format!("/ipfs/{}/caf%E9.txt", root)).await;

    assert_eq!(StatusCode::OK, resp.status());
    assert_eq!(
        "text/plain; charset=utf-8",
        resp.headers()["content-type"].to_str().unwrap()
    );
    assert_eq!(PP_TXT_CONTENTS, body_of(resp).await);
}
