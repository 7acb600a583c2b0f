//! Output serializers.

pub mod turtle;

pub use turtle::{read_stanzas, render_turtle, Stanza};
