//! drillfile - SQLite drill-design file storage with undo/redo
//!
//! This crate provides the core functionality for the `dfl` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Marcher, Page, MarcherPage, SectionAppearance)
//! - [`storage`] - SQLite database layer and the undo/redo history engine
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod error;
pub mod model;
pub mod storage;

pub use error::{Error, Result};
