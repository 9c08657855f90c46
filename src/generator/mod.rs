//! Feed generation.
//!
//! - **feed**: assembles extracted entries into an in-memory document
//! - **atom**: serializes that document to Atom 1.0 XML

pub mod atom;
pub mod feed;
