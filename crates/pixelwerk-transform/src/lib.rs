// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pixelwerk-transform — Pixel-buffer transforms for Pixelwerk.
//
// Provides the transform engine (grayscale, contrast, crop) over in-memory
// RGBA buffers, serialisable transform pipelines, and an adapter that bridges
// decoded images from the `image` crate into and out of the engine.

pub mod engine;
pub mod interop;
pub mod pipeline;

// Re-export the primary entry points so callers can use `pixelwerk_transform::crop` etc.
pub use engine::ops::{contrast, crop, grayscale};
pub use engine::transformer::Transformer;
pub use pipeline::{Pipeline, Transform};
