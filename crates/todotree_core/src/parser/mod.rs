//! Todo text format: annotation extraction, parsing and serialization.
//!
//! # Responsibility
//! - Convert file text to an ordered project/task tree and back.
//! - Keep all format knowledge (markers, sigils, indentation, notes) here.
//!
//! # Invariants
//! - Parsing is permissive and never fails; unrecognized lines are absorbed.
//! - Serialization emits task text verbatim; annotations are never
//!   re-rendered from the parsed views.
//! - `parse(serialize(parse(content)))` is structurally equal to
//!   `parse(content)`.

pub mod annotations;
pub mod todo_file;
