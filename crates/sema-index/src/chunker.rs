//! Fixed-size overlapping chunking on character offsets.

use crate::error::{IndexError, Result};

/// Chunker configuration.
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Window length in characters (default: 500).
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks (default: 50).
    pub overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            overlap: 50,
        }
    }
}

/// Splits raw text into overlapping fixed-size windows.
///
/// Offsets are Unicode scalar values, not bytes, so a multi-byte character is
/// never torn apart; syntactic units may be, which is an accepted property of
/// offset-based chunking rather than something to correct here.
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// # Errors
    ///
    /// Returns `InvalidParameters` unless `chunk_size > overlap`; a window
    /// that does not outsize its overlap cannot advance through the text.
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        if config.chunk_size == 0 || config.overlap >= config.chunk_size {
            return Err(IndexError::InvalidParameters(format!(
                "chunk_size ({}) must exceed overlap ({})",
                config.chunk_size, config.overlap
            )));
        }
        Ok(Self { config })
    }

    /// Split text into overlapping windows in document order.
    ///
    /// Consecutive chunks share exactly `overlap` characters except the final
    /// chunk, which may be shorter. Empty input yields no chunks.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let step = self.config.chunk_size - self.config.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.config.chunk_size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            start += step;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(chunk_size: usize, overlap: usize) -> Chunker {
        Chunker::new(ChunkerConfig {
            chunk_size,
            overlap,
        })
        .unwrap()
    }

    /// Undo the overlap: first chunk whole, every later chunk minus its
    /// leading `overlap` characters.
    fn reassemble(chunks: &[String], overlap: usize) -> String {
        let mut out = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(chunk);
            } else {
                out.extend(chunk.chars().skip(overlap));
            }
        }
        out
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunker(500, 50).split("").is_empty());
    }

    #[test]
    fn short_text_yields_single_chunk() {
        assert_eq!(chunker(500, 50).split("ab"), vec!["ab"]);
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let err = Chunker::new(ChunkerConfig {
            chunk_size: 0,
            overlap: 0,
        })
        .unwrap_err();
        assert!(matches!(err, IndexError::InvalidParameters(_)));
    }

    #[test]
    fn overlap_equal_to_chunk_size_rejected() {
        let err = Chunker::new(ChunkerConfig {
            chunk_size: 50,
            overlap: 50,
        })
        .unwrap_err();
        assert!(matches!(err, IndexError::InvalidParameters(_)));
    }

    #[test]
    fn overlap_exceeding_chunk_size_rejected() {
        assert!(
            Chunker::new(ChunkerConfig {
                chunk_size: 10,
                overlap: 20,
            })
            .is_err()
        );
    }

    #[test]
    fn consecutive_chunks_share_overlap() {
        let chunks = chunker(10, 3).split("abcdefghijklmnopqrstuvwxyz");
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().skip(pair[0].chars().count() - 3).collect();
            let head: String = pair[1].chars().take(3).collect();
            if pair[1].chars().count() >= 3 {
                assert_eq!(tail, head);
            }
        }
    }

    #[test]
    fn chunks_reassemble_to_original() {
        let text = "fn add(a: i32, b: i32) -> i32 { a + b } // plus trailing commentary";
        let chunks = chunker(16, 4).split(text);
        assert_eq!(reassemble(&chunks, 4), text);
    }

    #[test]
    fn chunk_count_matches_window_arithmetic() {
        // step = 450; 1000 chars need starts at 0, 450, 900.
        let text = "x".repeat(1000);
        assert_eq!(chunker(500, 50).split(&text).len(), 3);
        assert_eq!(chunker(500, 50).split(&"x".repeat(900)).len(), 2);
        assert_eq!(chunker(500, 50).split(&"x".repeat(450)).len(), 1);
    }

    #[test]
    fn multibyte_characters_not_torn() {
        let text = "日本語のテキストを分割する".repeat(10);
        let chunks = chunker(7, 2).split(&text);
        assert_eq!(reassemble(&chunks, 2), text);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 7);
        }
    }

    #[test]
    fn deterministic_for_same_input() {
        let c = chunker(12, 5);
        let text = "some representative input text for chunking";
        assert_eq!(c.split(text), c.split(text));
    }

    mod proptest_chunker {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn split_never_panics(
                text in "\\PC{0,2000}",
                chunk_size in 1usize..600,
                overlap in 0usize..600,
            ) {
                if let Ok(c) = Chunker::new(ChunkerConfig { chunk_size, overlap }) {
                    let _ = c.split(&text);
                }
            }

            #[test]
            fn chunk_count_is_ceil_of_len_over_step(
                text in "[a-z0-9 ]{0,1500}",
                chunk_size in 2usize..300,
                overlap in 0usize..100,
            ) {
                prop_assume!(overlap < chunk_size);
                let c = Chunker::new(ChunkerConfig { chunk_size, overlap }).unwrap();
                let chunks = c.split(&text);
                let len = text.chars().count();
                let step = chunk_size - overlap;
                let expected = len.div_ceil(step);
                prop_assert_eq!(chunks.len(), expected);
            }

            #[test]
            fn reassembly_reconstructs_input(
                text in "\\PC{0,1500}",
                chunk_size in 2usize..300,
                overlap in 0usize..100,
            ) {
                prop_assume!(overlap < chunk_size);
                let c = Chunker::new(ChunkerConfig { chunk_size, overlap }).unwrap();
                let chunks = c.split(&text);
                prop_assert_eq!(reassemble(&chunks, overlap), text);
            }

            #[test]
            fn chunks_never_exceed_window(
                text in "[a-z]{0,1000}",
                chunk_size in 1usize..200,
                overlap in 0usize..50,
            ) {
                prop_assume!(overlap < chunk_size);
                let c = Chunker::new(ChunkerConfig { chunk_size, overlap }).unwrap();
                for chunk in c.split(&text) {
                    prop_assert!(chunk.chars().count() <= chunk_size);
                    prop_assert!(!chunk.is_empty());
                }
            }
        }
    }
}
