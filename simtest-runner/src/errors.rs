// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by simtest-runner.

use camino::Utf8PathBuf;
use thiserror::Error;

/// An error that occurred while setting up the signal handler.
#[derive(Debug, Error)]
#[error("error setting up signal handler")]
pub struct SignalHandlerSetupError(#[from] std::io::Error);

/// An error that occurred while building a
/// [`SimRunner`](crate::runner::SimRunner).
#[derive(Debug, Error)]
pub enum SimRunnerBuildError {
    /// An error occurred while creating the Tokio runtime.
    #[error("error creating Tokio runtime")]
    TokioRuntimeCreate(#[source] std::io::Error),

    /// An error occurred while setting up signal handlers.
    #[error(transparent)]
    SignalHandlerSetup(#[from] SignalHandlerSetupError),
}

/// An error that occurred while writing a run event to its outputs.
#[derive(Debug, Error)]
pub enum WriteEventError {
    /// An error occurred while writing to the console.
    #[error("error writing to output")]
    Io(#[source] std::io::Error),

    /// An error occurred while writing the report file.
    #[error("error writing report file `{path}`")]
    Report {
        /// The report file path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        error: std::io::Error,
    },

    /// An error occurred while serializing the report document.
    #[error("error serializing report document for `{path}`")]
    Json {
        /// The report file path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        error: serde_json::Error,
    },
}
