//! File ingestion: decode bytes, tokenize, accumulate term frequencies
//!
//! Small files are read and decoded in one shot. Files at or above the
//! size threshold stream through fixed-size blocks with an incremental
//! decoder, so peak memory stays bounded by the block size plus the
//! longest unbroken token. Both paths produce identical frequency maps
//! for identical content.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use encoding_rs::{Decoder, DecoderResult, Encoding, GBK, UTF_8};
use tracing::debug;

use crate::error::IngestError;
use crate::frequency::FrequencyMap;
use crate::tokenizer::Tokenizer;

/// Files below this many bytes are read whole (10 MiB).
pub const DEFAULT_SMALL_FILE_THRESHOLD: u64 = 10 * 1024 * 1024;

/// Block size for the streaming path (1 MiB).
pub const DEFAULT_BLOCK_SIZE: usize = 1024 * 1024;

/// Reads a text file and produces its term-frequency map.
///
/// Decoding tries UTF-8 first, then one legacy fallback (GBK by
/// default, for mainland-Chinese corpora); failing both is a
/// [`IngestError::Decode`]. The size threshold and block size are
/// explicit configuration rather than globals.
#[derive(Debug)]
pub struct Ingestor {
    tokenizer: Tokenizer,
    small_file_threshold: u64,
    block_size: usize,
    fallback: &'static Encoding,
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new(Tokenizer::default())
    }
}

impl Ingestor {
    /// Create an ingestor with the default threshold, block size, and
    /// GBK fallback encoding.
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self::with_limits(tokenizer, DEFAULT_SMALL_FILE_THRESHOLD, DEFAULT_BLOCK_SIZE)
    }

    /// Create an ingestor with custom size limits.
    pub fn with_limits(tokenizer: Tokenizer, small_file_threshold: u64, block_size: usize) -> Self {
        Self {
            tokenizer,
            small_file_threshold,
            // A zero block size would make the streaming loop spin
            block_size: block_size.max(1),
            fallback: GBK,
        }
    }

    /// Ingest a file into a frequency map, choosing the whole-file or
    /// streaming path based on its size.
    pub fn ingest(&self, path: &Path) -> Result<FrequencyMap, IngestError> {
        let size = std::fs::metadata(path)
            .map_err(|e| IngestError::io(path, e))?
            .len();

        if size < self.small_file_threshold {
            debug!(path = %path.display(), size, "ingesting whole file");
            self.ingest_whole(path)
        } else {
            debug!(path = %path.display(), size, "ingesting in blocks");
            match self.ingest_blocks(path, UTF_8) {
                Err(IngestError::Decode { .. }) => {
                    debug!(
                        path = %path.display(),
                        fallback = self.fallback.name(),
                        "UTF-8 stream malformed, restarting with fallback encoding"
                    );
                    self.ingest_blocks(path, self.fallback)
                }
                result => result,
            }
        }
    }

    /// Small-file path: one read, one decode, one tokenization pass.
    fn ingest_whole(&self, path: &Path) -> Result<FrequencyMap, IngestError> {
        let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
        let text = self.decode_whole(path, &bytes)?;
        let mut map = FrequencyMap::new();
        map.accumulate(self.tokenizer.tokenize(&text));
        Ok(map)
    }

    fn decode_whole(&self, path: &Path, bytes: &[u8]) -> Result<String, IngestError> {
        let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
        if !had_errors {
            return Ok(text.into_owned());
        }
        debug!(
            path = %path.display(),
            fallback = self.fallback.name(),
            "not valid UTF-8, trying fallback encoding"
        );
        let (text, had_errors) = self.fallback.decode_without_bom_handling(bytes);
        if !had_errors {
            return Ok(text.into_owned());
        }
        Err(IngestError::Decode {
            path: path.to_path_buf(),
            fallback: self.fallback.name(),
        })
    }

    /// Streaming path: decode and tokenize block by block.
    ///
    /// `pending` carries text that may still be part of an unfinished
    /// token. After each block, every token except an open trailing run
    /// is counted; the open run is held back and re-tokenized together
    /// with the next block, so a block edge never splits a token. The
    /// incremental decoder likewise holds bytes of a character split
    /// across block reads.
    fn ingest_blocks(
        &self,
        path: &Path,
        encoding: &'static Encoding,
    ) -> Result<FrequencyMap, IngestError> {
        let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
        let mut reader = BufReader::new(file);
        let mut decoder = encoding.new_decoder_with_bom_removal();
        let mut block = vec![0u8; self.block_size];
        let mut pending = String::new();
        let mut map = FrequencyMap::new();

        loop {
            let n = reader
                .read(&mut block)
                .map_err(|e| IngestError::io(path, e))?;
            let last = n == 0;
            self.decode_into(path, &mut decoder, &block[..n], last, &mut pending)?;

            if last {
                map.accumulate(self.tokenizer.tokenize(&pending));
                return Ok(map);
            }

            let ends_open = pending
                .chars()
                .next_back()
                .is_some_and(|c| !self.tokenizer.is_separator(c));
            let mut tokens = self.tokenizer.tokenize(&pending);
            if ends_open {
                // The trailing run may continue in the next block
                pending = tokens.pop().unwrap_or_default();
            } else {
                pending.clear();
            }
            map.accumulate(tokens);
        }
    }

    fn decode_into(
        &self,
        path: &Path,
        decoder: &mut Decoder,
        mut src: &[u8],
        last: bool,
        dst: &mut String,
    ) -> Result<(), IngestError> {
        loop {
            let needed = decoder
                .max_utf8_buffer_length_without_replacement(src.len())
                .unwrap_or(src.len());
            dst.reserve(needed.max(16));
            let (result, read) = decoder.decode_to_string_without_replacement(src, dst, last);
            src = &src[read..];
            match result {
                DecoderResult::InputEmpty => return Ok(()),
                DecoderResult::OutputFull => continue,
                DecoderResult::Malformed(..) => {
                    return Err(IngestError::Decode {
                        path: path.to_path_buf(),
                        fallback: self.fallback.name(),
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_small_file() {
        let file = write_temp("今天是星期天，天气晴。".as_bytes());
        let map = Ingestor::default().ingest(file.path()).unwrap();
        assert_eq!(map.count("今天是星期天"), 1);
        assert_eq!(map.count("天气晴"), 1);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_empty_file() {
        let file = write_temp(b"");
        let map = Ingestor::default().ingest(file.path()).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = Ingestor::default()
            .ingest(Path::new("no_such_file.txt"))
            .unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn test_gbk_fallback() {
        let (bytes, _, _) = GBK.encode("今天是星期天，天气晴。");
        let file = write_temp(&bytes);
        let map = Ingestor::default().ingest(file.path()).unwrap();
        assert_eq!(map.count("今天是星期天"), 1);
        assert_eq!(map.count("天气晴"), 1);
    }

    #[test]
    fn test_undecodable_file() {
        // 0xFF is invalid UTF-8 and never a gb18030 lead byte
        let file = write_temp(&[0xFF, 0xFF]);
        let err = Ingestor::default().ingest(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::Decode { .. }));
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("天气晴".as_bytes());
        let file = write_temp(&bytes);
        let map = Ingestor::default().ingest(file.path()).unwrap();
        assert_eq!(map.count("天气晴"), 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_block_path_matches_whole_path() {
        let content = "今天是星期天，天气晴，今天晚上我要去看电影。Hello world 123 again hello";
        let file = write_temp(content.as_bytes());

        let whole = Ingestor::default().ingest(file.path()).unwrap();
        // Tiny block sizes force token and multi-byte character splits
        // at nearly every boundary
        for block_size in [1, 2, 3, 5, 7, 16] {
            let streaming = Ingestor::with_limits(Tokenizer::default(), 0, block_size);
            let chunked = streaming.ingest(file.path()).unwrap();
            assert_eq!(whole, chunked, "block_size {block_size}");
        }
    }

    #[test]
    fn test_block_boundary_inside_token() {
        // No separators at all: runs end only at class switches, which
        // rarely line up with 4-byte block edges
        let content = "天气晴abc天气晴";
        let file = write_temp(content.as_bytes());
        let streaming = Ingestor::with_limits(Tokenizer::default(), 0, 4);
        let map = streaming.ingest(file.path()).unwrap();
        assert_eq!(map.count("天气晴"), 2);
        assert_eq!(map.count("abc"), 1);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_block_path_gbk_fallback() {
        let (bytes, _, _) = GBK.encode("今天是星期天，天气晴。天气晴。");
        let file = write_temp(&bytes);
        let streaming = Ingestor::with_limits(Tokenizer::default(), 0, 3);
        let map = streaming.ingest(file.path()).unwrap();
        assert_eq!(map.count("今天是星期天"), 1);
        assert_eq!(map.count("天气晴"), 2);
    }

    #[test]
    fn test_repeated_clause_counts() {
        let file = write_temp("天气晴。天气晴。天气晴。".as_bytes());
        let map = Ingestor::default().ingest(file.path()).unwrap();
        assert_eq!(map.count("天气晴"), 3);
    }
}
