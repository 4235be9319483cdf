use crate::{nodeservice::MemoryNodeService, B3Digest, Cid, Directory};
use lazy_static::lazy_static;

pub const HELLOWORLD_BLOB_CONTENTS: &[u8] = b"Hello World!";
pub const EMPTY_BLOB_CONTENTS: &[u8] = b"";

pub const TESTFILE_CONTENTS: &[u8] = b"Plz add me!\n";
pub const PP_TXT_CONTENTS: &[u8] = b"It is a truth universally acknowledged, that a single man in possession of a good fortune, must be in want of a wife.\n";
pub const HOLMES_TXT_CONTENTS: &[u8] = b"To Sherlock Holmes she is always _the_ woman. I have seldom heard him mention her under any other name.\n";
pub const INDEX_HTML_CONTENTS: &[u8] = b"<!DOCTYPE html>\n<html>\n<head><title>test-site</title></head>\n<body><a href=\"pp.txt\">pp</a> <a href=\"holmes.txt\">holmes</a></body>\n</html>\n";
pub const HEXAGONS_SVG_CONTENTS: &[u8] = b"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"10\"><polygon points=\"5,0 10,3 10,7 5,10 0,7 0,3\"/></svg>\n";
pub const HEXAGONS_XML_SVG_CONTENTS: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"10\"><polygon points=\"5,0 10,3 10,7 5,10 0,7 0,3\"/></svg>\n";
// the JPEG SOI marker and a JFIF APP0 header, followed by EOI.
pub const CAT_JPG_CONTENTS: &[u8] = &[
    0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0xff, 0xd9,
];

/// Files in the `test-folder` fixture, a directory without an index.
pub const TEST_FOLDER: &[(&str, &[u8])] = &[
    ("pp.txt", PP_TXT_CONTENTS),
    ("holmes.txt", HOLMES_TXT_CONTENTS),
];

/// Files in the `test-site` fixture, a directory serving a web page.
pub const TEST_SITE: &[(&str, &[u8])] = &[
    ("pp.txt", PP_TXT_CONTENTS),
    ("holmes.txt", HOLMES_TXT_CONTENTS),
    ("index.html", INDEX_HTML_CONTENTS),
];

/// Files in the `test-mime-types` fixture.
pub const TEST_MIME_TYPES: &[(&str, &[u8])] = &[
    ("cat.jpg", CAT_JPG_CONTENTS),
    ("hexagons-xml.svg", HEXAGONS_XML_SVG_CONTENTS),
    ("hexagons.svg", HEXAGONS_SVG_CONTENTS),
    ("pp.txt", PP_TXT_CONTENTS),
    ("index.html", INDEX_HTML_CONTENTS),
];

lazy_static! {
    pub static ref DUMMY_DIGEST: B3Digest = (&[0u8; 32]).into();
    pub static ref DUMMY_CID: Cid = Cid::from_digest(&DUMMY_DIGEST);

    pub static ref HELLOWORLD_BLOB_CID: Cid = MemoryNodeService::default().put_blob(HELLOWORLD_BLOB_CONTENTS);

    // 1MB
    pub static ref BLOB_B: bytes::Bytes = (0..255).collect::<Vec<u8>>().repeat(4 * 1024).into();
}

/// Inserts each of the files into the [MemoryNodeService], and a flat
/// [Directory] referencing them in the given order. Returns the [Cid] of the
/// directory.
pub fn put_flat_directory(svc: &MemoryNodeService, files: &[(&str, &'static [u8])]) -> Cid {
    let mut directory = Directory::new();
    for (name, contents) in files {
        let cid = svc.put_blob(*contents);
        directory
            .add(
                (*name).try_into().expect("fixture names must be valid"),
                cid,
            )
            .expect("fixture names must be unique");
    }
    svc.put_directory(directory)
}
