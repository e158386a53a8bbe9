//! Layout documents consumed by the target IR builders.
//!
//! A `Doc` is an immutable tree of text fragments, horizontal and vertical
//! compositions and indentation scopes. The lowering engine only composes
//! documents; turning them into indented text happens in `render`.

mod doc;
mod render;

pub use doc::Doc;
