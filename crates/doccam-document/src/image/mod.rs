// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding photos into RGB rasters and encoding results.

pub mod codec;

pub use codec::{decode_rgb, encode_png, open_rgb, save_rgb};
