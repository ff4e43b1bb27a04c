//! vCard 3.0 (RFC 2426) parsing and validation.
//!
//! The pipeline lives in [`rfc::vcard`]: line unfolding, group extraction,
//! property tokenization and the per-property rule table, assembled into a
//! [`rfc::vcard::Card`] or the first [`rfc::vcard::ValidationError`].

pub mod rfc;
