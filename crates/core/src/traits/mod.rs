//! Core traits for the real-estate query service
//!
//! Components that talk to the outside world sit behind these traits so
//! they can be swapped by configuration and mocked in tests.
//!
//! ```text
//! Summarization:
//!   - Summarizer: Analysis payload → short natural-language text
//! ```

mod summarizer;

pub use summarizer::Summarizer;
