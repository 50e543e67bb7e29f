//! Fixture packages whose conversions are generated by the build script.

pub mod analyzer;
pub mod bidirectional;
pub mod cyclic;
pub mod maptype;
pub mod nested;
pub mod pointer;
pub mod simple;
pub mod slice;
pub mod unregistered;
