//! # bagdump-core
//!
//! A library for extracting and decoding the quiz database embedded inside a
//! compiled quiz executable.
//!
//! This crate provides the core functionality for:
//! - Extracting and decompressing the database blob hidden at a fixed offset
//!   in the executable
//! - Segmenting the blob into question and answer records by their recurring
//!   byte signatures (the format has no record table)
//! - Decoding records into typed content: text, embedded PNG images, or
//!   empty placeholders
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`database`]: Locating and decompressing the embedded database
//! - [`scanner`]: Signature scanning and record segmentation
//! - [`decode`]: Record and content item decoding
//! - [`layout`]: Binary layout profiles and format constants
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use bagdump_core::Decoder;
//!
//! let set = Decoder::new().decode_file("./quiz.exe")?;
//! for question in &set {
//!     println!("{} answers, correct: #{}", question.answers.len(), question.correct_answer);
//! }
//! # Ok::<(), bagdump_core::Error>(())
//! ```
//!
//! ## Layout profiles
//!
//! Field offsets are specific to the executable build, and the format has no
//! version field to detect them by. [`Layout`] groups the offsets into a
//! profile; the default profile matches the observed build, and callers with
//! a different build can supply their own via [`Decoder::with_layout`].

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod database;
pub mod decode;
pub mod error;
pub mod layout;
pub mod scanner;

// Re-export primary types for convenience
pub use database::Database;
pub use decode::{decode_file, Answer, ContentItem, Decoder, Question, QuestionSet};
pub use error::{Error, Result};
pub use layout::{AnswerLayout, ByteOrder, ItemLayout, Layout, QuestionLayout};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
