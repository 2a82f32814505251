//! CLI command implementations

pub(crate) mod common;
pub(crate) mod gen;
pub(crate) mod migrate;
pub(crate) mod status;
pub(crate) mod version;
