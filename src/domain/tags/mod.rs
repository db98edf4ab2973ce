//! Control tags embedded in model replies.

mod codec;
mod kind;

pub use codec::{
    strip_tags, TagRules, DEFAULT_CLOSURE_MARKER, DEFAULT_CLOSURE_TRIGGER,
    DEFAULT_SIMULATION_MARKER, DEFAULT_SIMULATION_NOTE, DEFAULT_SIMULATION_TRIGGER,
    TAG_DELIMITER,
};
pub use kind::TagKind;
