//! Markup tokenization and style tracking for the `pageflow` layout pipeline.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod lexer;
mod style;
mod token;

pub use lexer::lex;
pub use style::{FontSlant, FontWeight, StyleDescriptor, StyleState};
pub use token::{TagKind, Token};
