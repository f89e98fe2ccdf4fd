//! Structured-value capability consumed by the capture layer.
//!
//! A debugger host hands us opaque handles onto inspected memory. The
//! capture layer needs exactly five things from such a handle: member
//! lookup, array indexing, a null test, integer coercion, and C-string
//! dereference. This trait is that contract; everything above it is
//! generic and never names a host API.
//!
//! Implementations are expected to be cheap to clone (debugger value
//! handles usually are; `MemValue` is an `Rc` tree). All reads are
//! synchronous and side-effect free on the inspected process.

use crate::error::Result;

/// Read-only accessor over one structured value in inspected memory.
pub trait Value: Clone {
    /// Look up a struct/union member by name.
    fn field(&self, name: &'static str) -> Result<Self>;

    /// Index into an array-shaped value.
    fn index(&self, i: u64) -> Result<Self>;

    /// True if this value is a null pointer (or the host's null marker).
    fn is_null(&self) -> bool;

    /// Coerce to an unsigned integer. For pointers this is the address.
    fn as_u64(&self) -> Result<u64>;

    /// Coerce to a signed integer.
    fn as_i64(&self) -> Result<i64>;

    /// Dereference as a NUL-terminated byte string and decode it.
    ///
    /// Fails if the value is not a valid pointer to readable text; callers
    /// that merely *try* text (auto-detect payload mode) treat the failure
    /// as a fallback signal rather than propagating it.
    fn deref_cstr(&self) -> Result<String>;
}
