//! Incremental UTF-8 decoding for byte streams.
//!
//! Network reads can split a multi-byte character across two chunks, so the
//! decoder carries the undecoded tail across calls instead of decoding each
//! chunk in isolation.

/// Stateful incremental UTF-8 decoder.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode everything decodable from `input` plus any carried bytes.
    ///
    /// A trailing incomplete sequence is held back for the next call;
    /// genuinely invalid bytes become U+FFFD immediately.
    pub fn feed(&mut self, input: &[u8]) -> String {
        self.pending.extend_from_slice(input);

        let mut out = String::new();
        let mut rest: &[u8] = &self.pending;
        loop {
            match std::str::from_utf8(rest) {
                Ok(s) => {
                    out.push_str(s);
                    rest = &[];
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&rest[..valid]));
                    match e.error_len() {
                        Some(n) => {
                            out.push('\u{FFFD}');
                            rest = &rest[valid + n..];
                        }
                        None => {
                            // Incomplete trailing sequence: carry it over
                            rest = &rest[valid..];
                            break;
                        }
                    }
                }
            }
        }

        self.pending = rest.to_vec();
        out
    }

    /// Flush at end-of-stream: any dangling partial sequence is decoded
    /// lossily since no more bytes are coming.
    pub fn finish(&mut self) -> String {
        let tail = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.feed(b"hello"), "hello");
        assert_eq!(decoder.feed(b" world"), " world");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn test_multibyte_split_across_reads() {
        // "é" = 0xC3 0xA9, "漢" = 0xE6 0xBC 0xA2
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.feed(&[b'a', 0xC3]), "a");
        assert_eq!(decoder.feed(&[0xA9, 0xE6, 0xBC]), "\u{e9}");
        assert_eq!(decoder.feed(&[0xA2]), "\u{6f22}");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn test_invalid_byte_becomes_replacement() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.feed(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");
    }

    #[test]
    fn test_dangling_partial_flushed_at_end() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.feed(&[b'x', 0xE6, 0xBC]), "x");
        assert_eq!(decoder.finish(), "\u{FFFD}");
    }
}
