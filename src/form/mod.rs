//! Form Model - A working copy of a record tracked against an original
//! snapshot, with dirty markers, diffing, and revert.

mod model;

pub use model::FormModel;
