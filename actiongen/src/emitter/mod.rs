//! Code emitters.
//!
//! An emitter prints a synthesized [`CompilationUnit`](crate::synth::CompilationUnit)
//! as source text. [`RustEmitter`] is the only target.

mod rust;
mod traits;

pub use rust::RustEmitter;
pub use traits::{CodeGenerator, EmitterConfig};
