// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while computing a frame.  An orbit
//! that never escapes, or one that settles into a cycle, is an
//! ordinary answer and not an error.

use failure::Fail;

/// The error taxonomy shared by every module in the crate.
#[derive(Debug, Fail, PartialEq)]
pub enum MandelbrotError {
    /// A caller handed us a dimension, factor, palette or parameter
    /// that cannot describe a computation.
    #[fail(display = "invalid argument: {}", _0)]
    InvalidArgument(String),

    /// The iteration grid could not be allocated.  Nothing from the
    /// failed pass is retained.
    #[fail(display = "could not allocate a {}x{} iteration grid", width, height)]
    AllocationFailure {
        /// Requested grid width in pixels.
        width: usize,
        /// Requested grid height in pixels.
        height: usize,
    },

    /// One of the band workers panicked; the pass was discarded.
    #[fail(display = "a grid worker panicked during the pass")]
    WorkerPanicked,
}

impl MandelbrotError {
    pub(crate) fn invalid<S: Into<String>>(message: S) -> Self {
        MandelbrotError::InvalidArgument(message.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MandelbrotError>;
