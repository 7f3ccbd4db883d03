// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Penumbra crates.
//!
//! Each adapter is gated behind a feature flag so the core dispatcher stays
//! independent of any concrete hierarchy.
//!
//! ## Available Adapters
//!
//! - [`tree`] (`tree_adapter` feature, on by default): implements
//!   [`TreeLookup`](crate::TreeLookup) for [`penumbra_tree::Tree`].

#[cfg(feature = "tree_adapter")]
pub mod tree;
