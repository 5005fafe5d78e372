// src/utils.rs
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURI` leaves untouched: unreserved marks plus the URI
/// reserved set, so paths and query delimiters survive encoding.
const URI_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

const AUDIO_EXTENSIONS: [&str; 3] = ["mp3", "wav", "m4a"];

/// Encode a file name or relative URL the way the browser's `encodeURI` does.
pub fn encode_uri(raw: &str) -> String {
    utf8_percent_encode(raw, URI_SET).to_string()
}

/// Append a time-based query parameter so a reload bypasses stale caches.
pub fn cache_busted(url: &str, now_ms: u64) -> String {
    format!("{}?v={}", url, now_ms)
}

/// Track name shown to the listener: the file name minus a known audio extension.
pub fn track_title(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, ext))
            if AUDIO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext)) =>
        {
            stem
        }
        _ => file_name,
    }
}

/// Trimmed attribute value, `None` when absent or blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Current time in epoch milliseconds.
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uri_keeps_path_delimiters() {
        assert_eq!(encode_uri("docs/Guión Escena.pdf"), "docs/Gui%C3%B3n%20Escena.pdf");
        assert_eq!(
            encode_uri("https://host/a?b=c&d=e#f"),
            "https://host/a?b=c&d=e#f"
        );
        assert_eq!(encode_uri("Pista (final).mp3"), "Pista%20(final).mp3");
    }

    #[test]
    fn test_cache_busted() {
        assert_eq!(cache_busted("a.mp3", 42), "a.mp3?v=42");
    }

    #[test]
    fn test_track_title() {
        assert_eq!(track_title("Pista.mp3"), "Pista");
        assert_eq!(track_title("Obertura.WAV"), "Obertura");
        assert_eq!(track_title("tema.m4a"), "tema");
        assert_eq!(track_title("notas.ogg"), "notas.ogg");
        assert_eq!(track_title("sin_extension"), "sin_extension");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  x ")), Some("x".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
