//! Text analysis for search queries and highlight snippets.
//!
//! Query text and document text go through the same tokenizer so that
//! replacement-map keys, canonical words and query tokens line up.

pub mod markup;
pub mod stop_words;
pub mod tokenizer;

pub use markup::*;
pub use stop_words::*;
pub use tokenizer::*;
