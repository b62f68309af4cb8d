//! IAM condition-expression adapter.
//!
//! Translates the raw `(title, expression)` pair carried on an IAM
//! condition into the domain vocabulary the rest of the system works with:
//! an eligibility marker with its [`ActivationType`], a previously-activated
//! temporary window, or neither.

mod activation_type;
mod condition;
mod error;
mod markers;
mod window;

pub use activation_type::{ActivationType, MAX_TOPIC_LEN};
pub use condition::{recognize, RecognizedCondition, ACTIVATED_CONDITION_TITLE};
pub use error::ConditionError;
pub use markers::{recognize_marker, recognize_reviewer_marker, RecognizedMarker};
pub use window::{parse_window, RecognizedWindow};
