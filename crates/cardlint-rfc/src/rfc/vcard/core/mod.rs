//! vCard core types (RFC 2426).
//!
//! - [`Card`] - A validated vCard and its original text
//! - [`Property`] - One unfolded content line
//! - [`Parameters`] - Property parameters with set-valued entries

mod card;
mod parameter;
mod property;

pub use card::Card;
pub use parameter::{Parameters, is_only};
pub use property::{Property, names};
