//! Text rendering of exported transactions
//!
//! Each exported item becomes one self-contained block:
//!
//! ```text
//! ========================================================================
//! ITEM #1  [a3f2b]
//! URL: https://example.com/login
//! Method: POST
//! Target: https://example.com:443
//! ========================================================================
//!
//! ------------------------------------------------------------------------
//! [REQUEST]
//! ------------------------------------------------------------------------
//! POST /login HTTP/1.1
//! ...
//!
//! ------------------------------------------------------------------------
//! [RESPONSE]
//! ------------------------------------------------------------------------
//! HTTP/1.1 302 Found
//! ...
//!
//! ========================================================================
//! ```

use serde::{Deserialize, Serialize};

use crate::identifier::Identifier;
use crate::transaction::HttpTransaction;

/// Width of the separator lines
pub const SEPARATOR_WIDTH: usize = 72;

/// Placeholder written when no response was captured
pub const NO_RESPONSE: &str = "(no response received)";

/// Placeholder written when the host holds no request bytes
pub const NO_REQUEST: &str = "(no request data)";

/// How raw payload bytes are turned into text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decoding {
    /// Copy bytes verbatim
    #[default]
    Raw,
    /// Decode as UTF-8, replacing invalid sequences with U+FFFD
    Utf8Lossy,
}

impl Decoding {
    fn push(self, out: &mut Vec<u8>, data: &[u8]) {
        match self {
            Decoding::Raw => out.extend_from_slice(data),
            Decoding::Utf8Lossy => out.extend_from_slice(String::from_utf8_lossy(data).as_bytes()),
        }
    }
}

/// Render one transaction into its export block
#[must_use]
pub fn render<T: HttpTransaction + ?Sized>(
    order: usize,
    identifier: &Identifier,
    transaction: &T,
    decoding: Decoding,
) -> Vec<u8> {
    let sep = "=".repeat(SEPARATOR_WIDTH);
    let line = "-".repeat(SEPARATOR_WIDTH);

    let mut header = vec![
        sep.clone(),
        format!("ITEM #{order}  [{identifier}]"),
        format!("URL: {}", transaction.url()),
        format!("Method: {}", transaction.method()),
        format!("Target: {}", transaction.service()),
    ];
    if let Some(comment) = transaction.comment().filter(|c| !c.is_empty()) {
        header.push(format!("Comment: {comment}"));
    }
    header.push(sep.clone());

    let mut out = Vec::new();
    for text in &header {
        out.extend_from_slice(text.as_bytes());
        out.push(b'\n');
    }

    push_section(&mut out, &line, "[REQUEST]");
    match transaction.request() {
        Some(request) => decoding.push(&mut out, request),
        None => out.extend_from_slice(NO_REQUEST.as_bytes()),
    }
    out.push(b'\n');

    push_section(&mut out, &line, "[RESPONSE]");
    match transaction.response() {
        Some(response) => decoding.push(&mut out, response),
        None => out.extend_from_slice(NO_RESPONSE.as_bytes()),
    }
    out.push(b'\n');

    out.push(b'\n');
    out.extend_from_slice(sep.as_bytes());
    out
}

/// Blank line, then a titled section header
fn push_section(out: &mut Vec<u8>, line: &str, title: &str) {
    out.push(b'\n');
    for text in [line, title, line] {
        out.extend_from_slice(text.as_bytes());
        out.push(b'\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::{identify, IdentityScope};
    use crate::transaction::{HttpService, Transaction};

    fn sample() -> Transaction {
        Transaction::new(
            "POST",
            "https://example.com/login",
            HttpService::new("https", "example.com", 443),
            1,
            &b"POST /login HTTP/1.1\r\nHost: example.com\r\n\r\nuser=a"[..],
        )
        .with_response(&b"HTTP/1.1 302 Found\r\nLocation: /\r\n\r\n"[..])
    }

    fn render_str(order: usize, tx: &Transaction) -> String {
        let id = identify(tx, IdentityScope::default());
        String::from_utf8(render(order, &id, tx, Decoding::Raw)).unwrap()
    }

    #[test]
    fn test_render_layout() {
        let tx = sample();
        let id = identify(&tx, IdentityScope::default());
        let sep = "=".repeat(72);
        let line = "-".repeat(72);

        let expected = format!(
            "{sep}\n\
             ITEM #3  [{id}]\n\
             URL: https://example.com/login\n\
             Method: POST\n\
             Target: https://example.com:443\n\
             {sep}\n\
             \n\
             {line}\n\
             [REQUEST]\n\
             {line}\n\
             POST /login HTTP/1.1\r\nHost: example.com\r\n\r\nuser=a\n\
             \n\
             {line}\n\
             [RESPONSE]\n\
             {line}\n\
             HTTP/1.1 302 Found\r\nLocation: /\r\n\r\n\n\
             \n\
             {sep}"
        );

        assert_eq!(render_str(3, &tx), expected);
    }

    #[test]
    fn test_render_reproducible() {
        let tx = sample();
        let id = identify(&tx, IdentityScope::default());
        assert_eq!(
            render(1, &id, &tx, Decoding::Raw),
            render(1, &id, &tx, Decoding::Raw)
        );
    }

    #[test]
    fn test_missing_response_placeholder() {
        let mut tx = sample();
        tx.response = None;

        let text = render_str(1, &tx);
        let response_section = text.split("[RESPONSE]").nth(1).unwrap();
        assert!(response_section.contains(NO_RESPONSE));
        assert!(!text.contains("HTTP/1.1 302"));
    }

    #[test]
    fn test_missing_request_placeholder() {
        let mut tx = sample();
        tx.request = None;

        let text = render_str(1, &tx);
        assert!(text.contains(&format!("[REQUEST]\n{}\n{NO_REQUEST}\n", "-".repeat(72))));
    }

    #[test]
    fn test_comment_line() {
        let tx = sample().with_comment("interesting redirect");
        let text = render_str(1, &tx);
        assert!(text.contains("Target: https://example.com:443\nComment: interesting redirect\n"));

        let blank = sample().with_comment("");
        assert!(!render_str(1, &blank).contains("Comment:"));
    }

    #[test]
    fn test_raw_bytes_preserved() {
        let tx = sample().with_response(vec![0x48, 0xff, 0x00, 0x49]);
        let id = identify(&tx, IdentityScope::default());

        let raw = render(1, &id, &tx, Decoding::Raw);
        assert!(raw.windows(4).any(|w| w == [0x48, 0xff, 0x00, 0x49]));

        let lossy = String::from_utf8(render(1, &id, &tx, Decoding::Utf8Lossy)).unwrap();
        assert!(lossy.contains("H\u{fffd}\u{0}I"));
    }

    #[test]
    fn test_no_trailing_newline() {
        let text = render_str(1, &sample());
        assert!(text.ends_with(&"=".repeat(72)));
        assert!(!text.ends_with('\n'));
    }
}
