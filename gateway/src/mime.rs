use http::HeaderValue;
use mime_guess::mime::{self, Mime};
use std::fmt::{self, Display};

/// The charset announced for all `text/*` types.
const TEXT_CHARSET: &str = "utf-8";

/// A MIME type, plus the charset to announce along with it.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
    mime: Mime,
    charset: Option<&'static str>,
}

impl MediaType {
    /// The type without any parameters, like `text/plain`.
    pub fn essence(&self) -> &str {
        self.mime.essence_str()
    }

    pub fn charset(&self) -> Option<&'static str> {
        self.charset
    }

    pub fn to_header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&self.to_string())
            .expect("mime types and charsets are always valid header values")
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.charset {
            Some(charset) => write!(f, "{}; charset={}", self.mime.essence_str(), charset),
            None => f.write_str(self.mime.essence_str()),
        }
    }
}

/// Determines the [MediaType] of a file by the extension of its name.
///
/// The extension is whatever follows the last `.`, compared
/// case-insensitively. Unknown or missing extensions give
/// `application/octet-stream`.
pub fn classify(file_name: &str) -> MediaType {
    let mime = match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => {
            mime_guess::from_ext(&ext.to_ascii_lowercase()).first_or_octet_stream()
        }
        _ => mime::APPLICATION_OCTET_STREAM,
    };

    let charset = (mime.type_() == mime::TEXT).then_some(TEXT_CHARSET);

    MediaType { mime, charset }
}
