// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transform engine — grayscale, contrast, and bottom-left-origin cropping.

pub mod ops;
pub mod transformer;

pub use transformer::Transformer;
