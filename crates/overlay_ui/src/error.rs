//! # UI Error Types
//!
//! Everything that can stop a blueprint or style document from compiling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or compiling markup.
#[derive(Error, Debug)]
pub enum UiError {
    /// A markup file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("malformed markup: {0}")]
    Markup(String),

    /// The blueprint contains no element at all.
    #[error("blueprint has no root element")]
    MissingRoot,

    /// The blueprint's first element is not a `Node`.
    #[error("blueprint root must be a Node element, found <{0}>")]
    UnexpectedRoot(String),

    /// An attribute value could not be interpreted.
    #[error("invalid value {value:?} for {element}.{attribute}")]
    InvalidAttribute {
        /// Element carrying the attribute.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Raw attribute value.
        value: String,
    },

    /// Elements are nested deeper than any compilable document.
    #[error("markup nested deeper than {limit} elements")]
    TooDeep {
        /// Deepest nesting accepted.
        limit: usize,
    },

    /// More nodes were declared than the node array holds.
    #[error("node capacity of {0} exceeded")]
    NodeCapacity(usize),

    /// More classes were declared than the class array holds.
    #[error("class capacity of {0} exceeded")]
    ClassCapacity(usize),

    /// More distinct behaviors were bound than the callback array holds.
    #[error("callback capacity of {0} exceeded")]
    CallbackCapacity(usize),

    /// A node declared more children than it has slots for.
    #[error("node {node} declares more than {limit} children")]
    TooManyChildren {
        /// Index of the offending node.
        node: usize,
        /// Child slots per node.
        limit: usize,
    },
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
