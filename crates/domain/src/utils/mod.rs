//! Pure helper functions

pub mod media;
