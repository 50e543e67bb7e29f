pub mod api;
pub mod convert;
pub mod model;
pub mod unmarked;
