//! Utility functions for code derivation and URL validation.
//!
//! This module provides helper functions used across the application:
//!
//! - [`base62`] - Base-62 integer codec over the fixed code alphabet
//! - [`checksum`] - Corruption-detecting checksum suffix for codes
//! - [`url_validator`] - Destination URL validation

pub mod base62;
pub mod checksum;
pub mod url_validator;
