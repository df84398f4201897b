//! docsim core - clause/word tokenization and cosine document similarity
//!
//! This library tokenizes mixed Chinese/English text into clause and word
//! units, accumulates term-frequency maps, and compares documents with
//! cosine similarity over the resulting sparse vectors.

pub mod error;
pub mod frequency;
pub mod ingest;
pub mod similarity;
pub mod tokenizer;

pub use error::IngestError;
pub use frequency::FrequencyMap;
pub use ingest::Ingestor;
pub use similarity::cosine;
pub use tokenizer::Tokenizer;
