//! Integration test crate for Cutline.
//!
//! This crate exists solely to hold cross-crate integration tests and
//! property tests over the timeline algorithms.

#[cfg(test)]
mod timeline;

#[cfg(test)]
mod effects;

#[cfg(test)]
mod text;

#[cfg(test)]
mod audio;

#[cfg(test)]
mod render;

#[cfg(test)]
mod properties;
