//! Common data types

pub mod cloud;
pub mod orientation;
pub mod scan;

pub use cloud::*;
pub use orientation::*;
pub use scan::*;
