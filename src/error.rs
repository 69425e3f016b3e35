//! Error types for netlist drawing.
//!
//! This module provides a unified error type [`NetlistError`] that covers
//! every failure between reading a netlist document and producing a
//! finished layout. None of them are recoverable: the input is a static
//! file, so the whole run stops at the first error.

use thiserror::Error;

/// Result type alias using [`NetlistError`].
pub type Result<T> = std::result::Result<T, NetlistError>;

/// Unified error type for all netlist drawing operations.
#[derive(Error, Debug)]
pub enum NetlistError {
    // ============ I/O Errors ============
    /// The netlist file could not be opened or read
    #[error("Failed to read netlist file '{path}': {source}")]
    FileUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ============ Netlist Errors ============
    /// The document does not have the expected shape
    #[error("Malformed netlist at {context}: {message}")]
    MalformedInput { context: String, message: String },

    /// An output port drives an input port that no atom declares
    #[error("Unresolved port '{port}' driven by output '{oport}' of atom '{atom}'")]
    UnresolvedPort {
        port: String,
        atom: String,
        oport: String,
    },

    // ============ Layout Errors ============
    /// Invalid layout parameter
    #[error("Invalid layout parameter: {message}")]
    InvalidLayoutParam { message: String },

    /// A force layout returned a position count that does not match the graph
    #[error("Force layout produced {actual} positions for {expected} nodes")]
    LayoutMismatch { expected: usize, actual: usize },

    /// A force layout placed a node at a NaN or infinite coordinate
    #[error("Force layout placed node '{node}' at a non-finite position")]
    DegenerateLayout { node: String },

    /// Invalid random netlist parameter
    #[error("Invalid generator parameter: {message}")]
    InvalidGeneratorParam { message: String },

    // ============ Export Errors ============
    /// The drawing could not be serialized
    #[error("Export error: {message}")]
    Export { message: String },
}

impl NetlistError {
    /// Create a malformed input error
    pub fn malformed(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an unresolved port error
    pub fn unresolved(
        port: impl Into<String>,
        atom: impl Into<String>,
        oport: impl Into<String>,
    ) -> Self {
        Self::UnresolvedPort {
            port: port.into(),
            atom: atom.into(),
            oport: oport.into(),
        }
    }

    /// Create an invalid layout parameter error
    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::InvalidLayoutParam {
            message: message.into(),
        }
    }
}
