//! Core types shared by the link and HTML layers.

mod link;

pub use link::LinkKind;
