//! Tests for the normalizer and shaper

#[cfg(test)]
mod shaper_tests;
