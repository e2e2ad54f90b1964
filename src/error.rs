// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

/// Errors surfaced by the persistence layer.
///
/// Callers are expected to re-fetch authoritative state after a failure
/// rather than retry inside the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A store operation was invoked without a signed-in account.
    #[error("no account is signed in; run `pocketbook profile sign-in` first")]
    AuthenticationRequired,

    /// The record targeted by an update does not exist.
    #[error("the requested record could not be found")]
    NotFound,

    /// The underlying write or transaction aborted.
    #[error("persistence failure: {0}")]
    Persistence(rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(error: rusqlite::Error) -> Self {
        match error {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
            e => StoreError::Persistence(e),
        }
    }
}
