//! Inline `data:` URI handling.
//!
//! Pickers on some platforms hand back the picked content inline as
//! `data:<mediatype>[;base64],<payload>` instead of a path. These helpers pull
//! the declared type out, decode the payload and build a file name for it.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::{DateTime, Utc};
use thiserror::Error;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = "base64";

/// Standard alphabet, padded on encode, padding optional on decode.
const TEXT_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum DataUriError {
    #[error("not a data URI")]
    NotDataUri,
    #[error("data URI has no ',' separating header and payload")]
    MissingPayload,
    #[error("data URI payload is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// A parsed `data:` URI. The payload is kept encoded until [`DataUri::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri<'a> {
    media_type: Option<&'a str>,
    base64: bool,
    payload: &'a str,
}

/// Cheap check used to route a picked location.
pub fn is_data_uri(location: &str) -> bool {
    location
        .get(..SCHEME.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SCHEME))
}

impl<'a> DataUri<'a> {
    pub fn parse(uri: &'a str) -> Result<Self, DataUriError> {
        if !is_data_uri(uri) {
            return Err(DataUriError::NotDataUri);
        }
        let rest = &uri[SCHEME.len()..];
        let (header, payload) = rest.split_once(',').ok_or(DataUriError::MissingPayload)?;

        let mut params = header.split(';');
        let media_type = params.next().map(str::trim).filter(|t| !t.is_empty());
        let base64 = params.any(|p| p.trim().eq_ignore_ascii_case(BASE64_MARKER));

        Ok(Self {
            media_type,
            base64,
            payload,
        })
    }

    /// The MIME type declared before the first `;` or `,`, if any.
    pub fn media_type(&self) -> Option<&'a str> {
        self.media_type
    }

    pub fn is_base64(&self) -> bool {
        self.base64
    }

    pub fn decode(&self) -> Result<Vec<u8>, DataUriError> {
        if self.base64 {
            decode_text_safe(self.payload)
        } else {
            Ok(urlencoding::decode_binary(self.payload.as_bytes()).into_owned())
        }
    }
}

/// Encode bytes with the text-safe (base64) alphabet.
pub fn encode_text_safe(bytes: &[u8]) -> String {
    TEXT_SAFE.encode(bytes)
}

/// Decode text produced by [`encode_text_safe`]. ASCII whitespace is ignored
/// and trailing padding is optional.
pub fn decode_text_safe(text: &str) -> Result<Vec<u8>, DataUriError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(TEXT_SAFE.decode(compact)?)
}

/// Name for inline content that arrived without one: `file-<millis>.<subtype>`.
pub fn synthesize_file_name(content_type: &str, now: DateTime<Utc>) -> String {
    format!("file-{}.{}", now.timestamp_millis(), extension_for(content_type))
}

fn extension_for(content_type: &str) -> String {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    let subtype = essence
        .split_once('/')
        .map(|(_, sub)| sub)
        .filter(|sub| !sub.is_empty())
        .unwrap_or("unknown");
    subtype
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        .collect::<String>()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_base64_png() {
        let uri = "data:image/png;base64,iVBORw0KGgo=";
        let parsed = DataUri::parse(uri).unwrap();
        assert_eq!(parsed.media_type(), Some("image/png"));
        assert!(parsed.is_base64());
        assert_eq!(
            parsed.decode().unwrap(),
            vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]
        );
    }

    #[test]
    fn parses_percent_encoded_payload() {
        let parsed = DataUri::parse("data:text/plain;charset=utf-8,Hello%2C%20World").unwrap();
        assert_eq!(parsed.media_type(), Some("text/plain"));
        assert!(!parsed.is_base64());
        assert_eq!(parsed.decode().unwrap(), b"Hello, World".to_vec());
    }

    #[test]
    fn missing_media_type_is_none() {
        let parsed = DataUri::parse("data:;base64,AAEC").unwrap();
        assert_eq!(parsed.media_type(), None);
        assert_eq!(parsed.decode().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn scheme_match_is_case_insensitive() {
        assert!(is_data_uri("DATA:text/plain,x"));
        assert!(!is_data_uri("/home/user/data:file"));
        assert!(!is_data_uri("dat"));
    }

    #[test]
    fn rejects_uri_without_payload() {
        assert!(matches!(
            DataUri::parse("data:image/png;base64"),
            Err(DataUriError::MissingPayload)
        ));
        assert!(matches!(
            DataUri::parse("file:///tmp/x"),
            Err(DataUriError::NotDataUri)
        ));
    }

    #[test]
    fn rejects_corrupt_base64() {
        let parsed = DataUri::parse("data:image/png;base64,@@@@").unwrap();
        assert!(matches!(parsed.decode(), Err(DataUriError::InvalidBase64(_))));
    }

    #[test]
    fn text_safe_round_trip() {
        let samples: [&[u8]; 4] = [b"", b"\x00", b"\xff\xfe\xfd\x00\x01", &[7u8; 1025]];
        for bytes in samples {
            let encoded = encode_text_safe(bytes);
            assert!(encoded.is_ascii());
            assert_eq!(decode_text_safe(&encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn decode_tolerates_whitespace_and_missing_padding() {
        assert_eq!(decode_text_safe("aGVs\nbG8").unwrap(), b"hello".to_vec());
    }

    #[test]
    fn synthesized_name_uses_subtype() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let name = synthesize_file_name("image/png", now);
        assert_eq!(name, format!("file-{}.png", now.timestamp_millis()));
        assert_eq!(synthesize_file_name("image/svg+xml", now).rsplit('.').next(), Some("svg+xml"));
        assert!(synthesize_file_name("garbage", now).ends_with(".unknown"));
    }
}
