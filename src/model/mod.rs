//! Data models for drillfile.
//!
//! This module contains all domain models:
//! - Marcher
//! - Page
//! - MarcherPage
//! - SectionAppearance

pub mod marcher;
pub mod page;

pub use marcher::Marcher;
pub use page::{MarcherPage, Page, SectionAppearance};
