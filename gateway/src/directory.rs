use cidgate_castore::Directory;
use http::HeaderValue;
use percent_encoding::percent_encode_byte;
use std::fmt::Write;
use tracing::debug;

use crate::path::{ContentPath, IPFS_PREFIX, PATH_SEGMENT};
use crate::response::GatewayResponse;

/// A directory containing an entry with this exact name is served as a web
/// site, by redirecting to it.
pub const INDEX_FILE: &str = "index.html";

/// Decides how to serve a [Directory] found at `path`.
///
/// If it contains an [INDEX_FILE], the client gets redirected there, so that
/// relative links inside of it resolve against the directory. Otherwise, a
/// listing of all entries is generated, in the order the backend returned
/// them.
pub fn respond(directory: &Directory, path: &ContentPath) -> GatewayResponse {
    if directory.get(INDEX_FILE.as_bytes()).is_some() {
        let location = format!("{}/{}", path.to_uri_path(PATH_SEGMENT), INDEX_FILE);
        debug!(%location, "redirecting to index");

        return GatewayResponse::redirect(
            HeaderValue::try_from(location).expect("percent-encoded paths are valid header values"),
        );
    }

    GatewayResponse::html(render_listing(directory, path))
}

/// Renders a minimal HTML document linking to each entry.
///
/// Entry names show up verbatim only in the link text. Hrefs have every byte
/// percent-encoded and the path in the headings is written as character
/// references, so neither repeats a name literally.
fn render_listing(directory: &Directory, path: &ContentPath) -> String {
    let title = char_refs(&path.to_string());

    let mut base = format!(
        "{}{}",
        IPFS_PREFIX,
        encode_all(path.root().as_str().as_bytes())
    );
    for segment in path.segments() {
        base.push('/');
        base.push_str(&encode_all(segment.as_ref()));
    }

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>Index of {}</title>", title);
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>Index of {}</h1>", title);
    out.push_str("<ul>\n");
    for entry in directory.entries() {
        let _ = writeln!(
            out,
            "<li><a href=\"{}/{}\">{}</a></li>",
            base,
            encode_all(entry.name().as_ref()),
            escape_html(&entry.name().to_string()),
        );
    }
    out.push_str("</ul>\n</body>\n</html>\n");

    out
}

/// Percent-encodes every byte, alphanumerics included.
fn encode_all(bytes: &[u8]) -> String {
    bytes.iter().map(|b| percent_encode_byte(*b)).collect()
}

/// Writes every character as a decimal character reference.
fn char_refs(s: &str) -> String {
    s.chars().map(|c| format!("&#{};", u32::from(c))).collect()
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
