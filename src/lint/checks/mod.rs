//! Individual lint checks

pub mod body;
pub mod receive;
pub mod target;
