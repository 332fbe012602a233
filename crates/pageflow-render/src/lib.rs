//! Display-list IR, font cache, layout engine, and viewport for `pageflow`.

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

mod display_list;
mod font;
mod layout;
mod viewport;

pub use pageflow::{FontSlant, FontWeight, StyleDescriptor};

pub use display_list::{DisplayList, PlacedWord};
pub use font::{FontCache, FontCacheStats, FontError, FontFace, FontMetrics, FontProvider};
pub use layout::{LayoutConfig, LayoutEngine};
pub use viewport::Viewport;
