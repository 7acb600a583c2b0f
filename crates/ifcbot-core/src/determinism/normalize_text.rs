//! Source text decoding for ifcbot.
//!
//! IFC files in the wild are mostly ASCII but regularly carry stray bytes from
//! legacy encodings. Decoding is best-effort and deterministic:
//! - invalid UTF-8 sequences are dropped (not replaced)
//! - a leading UTF-8 BOM is removed
//! - CRLF and CR are converted to LF
//!
//! Purely in-memory; no I/O.

/// Decode raw bytes, dropping invalid UTF-8 sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(s) => {
                out.push_str(s);
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    Some(n) => rest = &after[n..],
                    // Truncated sequence at end of input.
                    None => break,
                }
            }
        }
    }

    out
}

/// Normalize decoded text: strip BOM, convert CRLF/CR to LF.
pub fn normalize_text(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let s = input.strip_prefix('\u{FEFF}').unwrap_or(input);

    if !s.contains('\r') {
        return s.to_string();
    }
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Decode and normalize in one step.
pub fn decode_source(bytes: &[u8]) -> String {
    normalize_text(&decode_lossy(bytes))
}
