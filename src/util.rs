//! Shared utility modules used across querywise components.

pub mod levenshtein;
