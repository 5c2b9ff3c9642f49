//! Shared formatting options for the core data model.
//!
//! Hash suffixes on property stringification are controlled by an
//! explicit [`Format`] value threaded through the call, rather than a
//! process-wide mutable flag, so no global state is needed anywhere in
//! the core.

/// Formatting options for [`Property::display`](crate::property::Property::display).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Format {
    /// When `true`, a property's stringification is `name<hash>` instead
    /// of plain `name`.
    pub print_hash: bool,
}
