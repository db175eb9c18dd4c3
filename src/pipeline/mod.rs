//! Pipeline stages for PDF-to-PPTX conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch rendering backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ workspace ──▶ render ──▶ assemble
//! (path)    (.converted)  (pdfium)   (.pptx)
//! ```
//!
//! 1. [`input`]     — validate the source path and its `%PDF` magic bytes
//! 2. [`workspace`] — create the temporary image directory; an RAII guard
//!    removes it again on success and failure alike
//! 3. [`render`]    — rasterise pages one at a time to PNG files, each at
//!    its own resolution-derived scale
//! 4. [`assemble`]  — place each image centered on its own slide and save
//!    the finished package

pub mod assemble;
pub mod input;
pub mod render;
pub mod workspace;
