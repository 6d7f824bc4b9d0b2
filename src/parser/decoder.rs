// RcaCrab - GPL-3.0-or-later
// This file is part of RcaCrab.
//
// Copyright (C) 2026 Daniel Freiermuth
//
// RcaCrab is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// RcaCrab is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with RcaCrab.  If not, see <https://www.gnu.org/licenses/>.

//! Bytes to clean lines.
//!
//! Encoding is chosen in this order: byte-order mark, UTF-16 without a BOM
//! (sniffed from the NUL byte layout that Windows installer logs produce),
//! valid UTF-8, then a statistical guess. Decoding never fails; bytes that
//! do not fit the chosen encoding become U+FFFD.

use super::line::LogLine;
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

/// How many leading bytes the UTF-16 sniffer looks at.
const SNIFF_LEN: usize = 4096;

/// Characters Unicode treats as line boundaries, beyond `\n` and `\r\n`.
const EXTRA_LINE_BREAKS: &[char] = &[
    '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Pick the encoding of `bytes`, falling back to UTF-8.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    // ASCII-range UTF-16 is also valid UTF-8, so sniff it first.
    if let Some(encoding) = sniff_utf16(bytes) {
        return encoding;
    }

    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// UTF-16 text that is mostly ASCII has a NUL in every other byte.
fn sniff_utf16(bytes: &[u8]) -> Option<&'static Encoding> {
    let sample = &bytes[..bytes.len().min(SNIFF_LEN)];
    if sample.len() < 4 {
        return None;
    }

    let pairs = sample.len() / 2;
    let (mut even_nuls, mut odd_nuls) = (0usize, 0usize);
    for pair in sample.chunks_exact(2) {
        if pair[0] == 0 {
            even_nuls += 1;
        }
        if pair[1] == 0 {
            odd_nuls += 1;
        }
    }

    // More than half of one lane is NUL and the other lane is mostly text.
    if odd_nuls * 2 > pairs && even_nuls * 10 < pairs {
        Some(UTF_16LE)
    } else if even_nuls * 2 > pairs && odd_nuls * 10 < pairs {
        Some(UTF_16BE)
    } else {
        None
    }
}

/// Decode `bytes` into trimmed, non-empty lines, numbered 1..=n in the
/// order they are kept.
pub fn decode(bytes: &[u8]) -> Vec<LogLine> {
    profiling::scope!("decode");
    let encoding = detect_encoding(bytes);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(
            "Input is not clean {}; undecodable bytes were replaced",
            used.name()
        );
    }
    tracing::debug!("Decoded {} bytes as {}", bytes.len(), used.name());

    split_lines(&text)
}

/// Split decoded text into cleaned lines. Exposed for callers that already
/// hold a `str`.
pub fn split_lines(text: &str) -> Vec<LogLine> {
    let mut lines = Vec::new();
    for piece in text.lines().flat_map(|line| line.split(EXTRA_LINE_BREAKS)) {
        let without_nuls = piece.replace('\0', "");
        let cleaned = without_nuls.trim();
        if !cleaned.is_empty() {
            lines.push(LogLine::new(cleaned, lines.len() + 1));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[LogLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_strips_and_drops_blank_lines() {
        let lines = decode(b"  first  \n\n   \nsecond\r\n\tthird\t\n");
        assert_eq!(texts(&lines), vec!["first", "second", "third"]);
        let numbers: Vec<usize> = lines.iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_removes_embedded_nuls() {
        let lines = decode(b"ab\0c\n\0\0\n\0 d");
        assert_eq!(texts(&lines), vec!["abc", "d"]);
    }

    #[test]
    fn test_lone_carriage_return_splits() {
        let lines = decode(b"one\rtwo\nthree");
        assert_eq!(texts(&lines), vec!["one", "two", "three"]);
        assert_eq!(lines[2].line_number, 3);
    }

    #[test]
    fn test_utf16le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "Action start\nDone".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(detect_encoding(&bytes), UTF_16LE);
        assert_eq!(texts(&decode(&bytes)), vec!["Action start", "Done"]);
    }

    #[test]
    fn test_utf16le_without_bom() {
        let mut bytes = Vec::new();
        for unit in "MSI (s) (A4:B8) Installation started\r\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(detect_encoding(&bytes), UTF_16LE);
        assert_eq!(
            texts(&decode(&bytes)),
            vec!["MSI (s) (A4:B8) Installation started"]
        );
    }

    #[test]
    fn test_invalid_bytes_do_not_fail() {
        let lines = decode(b"caf\xe9 au lait\nok");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].text.starts_with("caf"));
        assert_eq!(lines[1].text, "ok");
    }

    #[test]
    fn test_plain_utf8_fast_path() {
        assert_eq!(detect_encoding("plain ascii".as_bytes()), UTF_8);
        assert_eq!(detect_encoding("grüße".as_bytes()), UTF_8);
    }

    #[test]
    fn test_empty_input() {
        assert!(decode(b"").is_empty());
    }
}
