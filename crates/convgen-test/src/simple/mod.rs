//! Conversions living in their own package, between types of two others.

pub mod converter;
pub mod domain;
pub mod handler;
