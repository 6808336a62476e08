mod reference;

pub use reference::{Reference, ReferenceError, CONTEXT_ROOT};
