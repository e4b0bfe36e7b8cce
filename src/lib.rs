#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod bytecode;
pub mod client;
pub mod error;
pub mod graph_op;
pub mod response;
pub mod status;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use bytecode::{Bytecode, Instruction};
pub use client::{ClientError, Transport, TransportError, submit};
pub use error::Error;
pub use graph_op::{GraphOp, OpRegistry};
pub use response::{
    Attributes, RemoteFailure, ResponseMessage, ResponseStatus, STATUS_ATTRIBUTE_EXCEPTIONS,
    STATUS_ATTRIBUTE_STACK_TRACE,
};
pub use status::ResponseStatusCode;
