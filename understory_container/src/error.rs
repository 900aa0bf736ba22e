// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the deferred mutation requests.
//!
//! Neither error is fatal. Callers typically log and carry on.

use thiserror::Error;

/// Why [`add_element`](crate::Container::add_element) refused a request.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum AttachError {
    /// The id does not refer to a live element of this container.
    #[error("element id is stale or belongs to another container")]
    Stale,
    /// The element already has a parent.
    #[error("element is already attached")]
    AlreadyAttached,
    /// The element is already queued for attachment at the next sync point.
    #[error("element is already queued for attachment")]
    AlreadyQueued,
}

/// Why [`remove_element`](crate::Container::remove_element) refused a request.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum DetachError {
    /// The id does not refer to a live element of this container.
    #[error("element id is stale or belongs to another container")]
    Stale,
    /// The element is not in the committed collection (it may still be queued for attachment).
    #[error("element is not attached")]
    NotAttached,
}
