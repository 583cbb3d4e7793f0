//! Version-dependent text handling.
//!
//! Below AC1021 text fields are stored single-byte in the drawing code
//! page; from AC1021 on they are wide characters. The [`TextContext`] holds
//! both facts for one document and is passed explicitly wherever encoding
//! matters - there is no process-wide "active version" state.
//!
//! All reads through the accessor facade return owned strings regardless of
//! version, so callers have a single ownership contract.

use crate::types::CadVersion;
use encoding_rs::Encoding;

/// Map a drawing code page name to an `encoding_rs` encoding.
///
/// Returns `None` when no transcoding is needed (ASCII/UTF-8). Unrecognized
/// names fall back to Windows-1252, the most common drawing code page.
pub fn encoding_from_code_page(code_page: &str) -> Option<&'static Encoding> {
    match code_page.to_ascii_lowercase().as_str() {
        // Asian encodings
        "gb2312" | "ansi_936" => Some(encoding_rs::GBK),
        "big5" | "ansi_950" => Some(encoding_rs::BIG5),
        "korean" | "ansi_949" => Some(encoding_rs::EUC_KR),
        "ansi_932" => Some(encoding_rs::SHIFT_JIS),

        // Windows/ANSI code pages
        "ansi_874" => Some(encoding_rs::WINDOWS_874),
        "ansi_1250" => Some(encoding_rs::WINDOWS_1250),
        "ansi_1251" => Some(encoding_rs::WINDOWS_1251),
        "ansi_1252" => Some(encoding_rs::WINDOWS_1252),
        "ansi_1253" => Some(encoding_rs::WINDOWS_1253),
        "ansi_1254" => Some(encoding_rs::WINDOWS_1254),
        "ansi_1255" => Some(encoding_rs::WINDOWS_1255),
        "ansi_1256" => Some(encoding_rs::WINDOWS_1256),
        "ansi_1257" => Some(encoding_rs::WINDOWS_1257),
        "ansi_1258" => Some(encoding_rs::WINDOWS_1258),

        // KOI8 (Cyrillic)
        "koi8-r" => Some(encoding_rs::KOI8_R),
        "koi8-u" => Some(encoding_rs::KOI8_U),

        // No transcoding needed
        "ascii" | "utf-8" | "utf8" | "unicode" => None,

        // Default drawing code page
        _ => Some(encoding_rs::WINDOWS_1252),
    }
}

/// Document-scoped text encoding context.
#[derive(Debug, Clone, Copy)]
pub struct TextContext {
    /// Format version deciding wide vs single-byte storage
    pub version: CadVersion,
    /// Code page for single-byte storage; `None` means plain ASCII/UTF-8
    pub code_page: Option<&'static Encoding>,
}

impl TextContext {
    /// Create a context from a version and a code page name.
    pub fn new(version: CadVersion, code_page: &str) -> Self {
        TextContext {
            version,
            code_page: encoding_from_code_page(code_page),
        }
    }

    /// Whether text is stored as wide characters.
    pub fn is_unicode(&self) -> bool {
        self.version.supports_unicode_text()
    }

    /// Normalize a string to what storage would hold.
    ///
    /// At or above the unicode threshold this is the identity. Below it,
    /// the string is round-tripped through the code page, so characters the
    /// page cannot represent degrade exactly as they would on disk. Always
    /// returns an owned copy.
    pub fn encode_for_storage(&self, value: &str) -> String {
        if self.is_unicode() {
            return value.to_owned();
        }
        match self.code_page {
            None => value.to_owned(),
            Some(enc) => {
                let (bytes, _, _) = enc.encode(value);
                let (decoded, _) = enc.decode_without_bom_handling(&bytes);
                decoded.into_owned()
            }
        }
    }

    /// Key equality under this context.
    ///
    /// Below the unicode threshold: ordinal comparison of the code-page
    /// byte encodings. At or above it: decoded character comparison.
    pub fn keys_equal(&self, a: &str, b: &str) -> bool {
        if self.is_unicode() {
            return a == b;
        }
        match self.code_page {
            None => a == b,
            Some(enc) => {
                let (ba, _, _) = enc.encode(a);
                let (bb, _, _) = enc.encode(b);
                ba == bb
            }
        }
    }
}

impl Default for TextContext {
    fn default() -> Self {
        TextContext::new(CadVersion::default(), "ANSI_1252")
    }
}
