//! Response extraction
//!
//! Reduces a judge's raw, unstructured response to something usable: the
//! final answer after a marker token, a candidate index, or a
//! decomposition triple. Pure text processing, no state and no I/O.
//!
//! | Function | Output |
//! |----------|--------|
//! | [`extract_final`] | Text after the last marker token |
//! | [`parse_vote_index`] | 0-based candidate index from extracted text |
//! | [`extract_decomposition`] | Canonical `P1=[..], P2=[..], C=[..]` line |
//! | [`parse_bracketed_field`] | One field of the canonical line |

pub mod decomposition;
pub mod final_answer;
pub mod token;

pub use decomposition::{Decomposition, extract_decomposition, parse_bracketed_field};
pub use final_answer::{extract_final, parse_vote_index};
pub use token::ExtractionToken;
