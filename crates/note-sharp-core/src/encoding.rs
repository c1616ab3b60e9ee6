/// Encoding detection and conversion for file I/O.
use anyhow::{Context, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Supported text encodings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    Ascii,
    /// A named encoding from `encoding_rs` (e.g., "windows-1252").
    Legacy(&'static str),
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utf8 => write!(f, "UTF-8"),
            Self::Utf8Bom => write!(f, "UTF-8 BOM"),
            Self::Utf16Le => write!(f, "UTF-16 LE"),
            Self::Utf16Be => write!(f, "UTF-16 BE"),
            Self::Ascii => write!(f, "ASCII"),
            Self::Legacy(name) => write!(f, "{name}"),
        }
    }
}

impl TextEncoding {
    /// Byte order mark written in front of the content, if any.
    pub fn bom(&self) -> &'static [u8] {
        match self {
            Self::Utf8Bom => UTF8_BOM,
            Self::Utf16Le => UTF16LE_BOM,
            Self::Utf16Be => UTF16BE_BOM,
            Self::Utf8 | Self::Ascii | Self::Legacy(_) => &[],
        }
    }
}

/// Detects the encoding of raw bytes.
///
/// BOMs win, then valid UTF-8 (reported as ASCII when every byte is 7-bit),
/// then whatever `chardetng` guesses.
pub fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    if bytes.starts_with(UTF8_BOM) {
        return TextEncoding::Utf8Bom;
    }
    if bytes.starts_with(UTF16LE_BOM) {
        return TextEncoding::Utf16Le;
    }
    if bytes.starts_with(UTF16BE_BOM) {
        return TextEncoding::Utf16Be;
    }

    if bytes.is_ascii() {
        return TextEncoding::Ascii;
    }
    if std::str::from_utf8(bytes).is_ok() {
        return TextEncoding::Utf8;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    TextEncoding::Legacy(detector.guess(None, true).name())
}

/// Decodes raw bytes into a String using the specified encoding.
///
/// A leading BOM matching the encoding is skipped.
///
/// # Errors
///
/// Returns an error if the bytes are malformed for the encoding.
pub fn decode_bytes(bytes: &[u8], encoding: TextEncoding) -> Result<String> {
    let content = bytes.strip_prefix(encoding.bom()).unwrap_or(bytes);

    let codec = match encoding {
        TextEncoding::Utf8 | TextEncoding::Utf8Bom | TextEncoding::Ascii => {
            return String::from_utf8(content.to_vec())
                .with_context(|| format!("invalid {encoding} content"));
        }
        TextEncoding::Utf16Le => encoding_rs::UTF_16LE,
        TextEncoding::Utf16Be => encoding_rs::UTF_16BE,
        TextEncoding::Legacy(name) => encoding_rs::Encoding::for_label(name.as_bytes())
            .with_context(|| format!("unknown encoding: {name}"))?,
    };

    codec
        .decode_without_bom_handling_and_without_replacement(content)
        .map(|text| text.into_owned())
        .with_context(|| format!("invalid {encoding} content"))
}

/// Encodes a string into bytes using the specified encoding, BOM included.
///
/// # Errors
///
/// Returns an error if the text cannot be represented in the encoding.
pub fn encode_string(text: &str, encoding: TextEncoding) -> Result<Vec<u8>> {
    let mut bytes = encoding.bom().to_vec();
    match encoding {
        // ASCII is a UTF-8 subset
        TextEncoding::Utf8 | TextEncoding::Utf8Bom | TextEncoding::Ascii => {
            bytes.extend_from_slice(text.as_bytes())
        }
        // encoding_rs only encodes to ASCII-compatible encodings
        TextEncoding::Utf16Le => {
            bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
        }
        TextEncoding::Utf16Be => {
            bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
        }
        TextEncoding::Legacy(name) => {
            let codec = encoding_rs::Encoding::for_label(name.as_bytes())
                .with_context(|| format!("unknown encoding: {name}"))?;
            let (encoded, _, had_errors) = codec.encode(text);
            if had_errors {
                anyhow::bail!("text cannot be represented as {name}");
            }
            bytes.extend_from_slice(&encoded);
        }
    }
    Ok(bytes)
}
