/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

The error type shared by bit streams and their byte backends.

*/

use std::io::ErrorKind;

/// Errors returned by bit streams and byte backends.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The byte source was exhausted before the requested bits were available.
    #[error("Unexpected end of stream")]
    EndOfStream,
    /// An argument was out of range: a bit count larger than 64, a value
    /// wider than its bit count (with feature `checks`), or a seek to a
    /// negative position.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A write was attempted on a closed [`BitWriter`](crate::impls::BitWriter).
    #[error("The bit writer has been closed")]
    Closed,
    /// Any other failure of the underlying byte stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Shortcut for results carrying an [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

impl Error {
    /// Maps the errors of [`std::io`] backends, turning unexpected EOFs into
    /// [`Error::EndOfStream`] and invalid inputs into [`Error::InvalidArgument`].
    pub fn from_io(e: std::io::Error) -> Self {
        match e.kind() {
            ErrorKind::UnexpectedEof => Error::EndOfStream,
            ErrorKind::InvalidInput => Error::InvalidArgument(e.to_string()),
            _ => Error::Io(e),
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::EndOfStream => ErrorKind::UnexpectedEof.into(),
            Error::InvalidArgument(msg) => std::io::Error::new(ErrorKind::InvalidInput, msg),
            Error::Closed => std::io::Error::new(ErrorKind::BrokenPipe, Error::Closed.to_string()),
            Error::Io(e) => e,
        }
    }
}
