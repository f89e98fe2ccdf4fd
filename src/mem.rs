//! `MemValue`: owned, in-memory structured values.
//!
//! The reference implementation of the [`Value`] capability. A `MemValue`
//! is a cheaply-clonable handle (an `Rc` around an immutable node) onto a
//! tree of structs, arrays, integers, pointers and C strings. It serves
//! three roles:
//! - fixture type for every test in the crate,
//! - embedding path for hosts that materialize a frozen snapshot of the
//!   inspected process rather than proxying live reads,
//! - executable documentation of what the capture layer actually touches.
//!
//! Single-threaded like the rest of the crate's value plumbing: `Rc` makes
//! these handles `!Send`/`!Sync`.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::value::Value;

#[derive(Debug)]
enum Node {
    Null,
    UInt(u64),
    Int(i64),
    /// Non-null pointer to payload we cannot (or choose not to) interpret.
    Ptr { addr: u64 },
    /// Non-null pointer to NUL-terminated text, pre-decoded.
    CStr { addr: u64, text: String },
    Struct(Vec<(&'static str, MemValue)>),
    Array(Vec<MemValue>),
}

/// Cheap handle onto an immutable value tree.
#[derive(Clone, Debug)]
pub struct MemValue(Rc<Node>);

impl MemValue {
    pub fn null() -> Self {
        MemValue(Rc::new(Node::Null))
    }

    pub fn uint(v: u64) -> Self {
        MemValue(Rc::new(Node::UInt(v)))
    }

    pub fn int(v: i64) -> Self {
        MemValue(Rc::new(Node::Int(v)))
    }

    /// Booleans travel as integers, the way debugger hosts expose C bools.
    pub fn boolean(v: bool) -> Self {
        MemValue::uint(v as u64)
    }

    pub fn ptr(addr: u64) -> Self {
        if addr == 0 {
            return MemValue::null();
        }
        MemValue(Rc::new(Node::Ptr { addr }))
    }

    pub fn cstr(addr: u64, text: impl Into<String>) -> Self {
        MemValue(Rc::new(Node::CStr {
            addr,
            text: text.into(),
        }))
    }

    pub fn record(fields: impl IntoIterator<Item = (&'static str, MemValue)>) -> Self {
        MemValue(Rc::new(Node::Struct(fields.into_iter().collect())))
    }

    pub fn array(items: impl IntoIterator<Item = MemValue>) -> Self {
        MemValue(Rc::new(Node::Array(items.into_iter().collect())))
    }

    // Short shape tag for error messages.
    fn describe(&self) -> String {
        match &*self.0 {
            Node::Null => "null".into(),
            Node::UInt(v) => format!("u64 {v}"),
            Node::Int(v) => format!("i64 {v}"),
            Node::Ptr { addr } => format!("ptr {addr:#x}"),
            Node::CStr { addr, .. } => format!("cstr {addr:#x}"),
            Node::Struct(fields) => format!("struct with {} fields", fields.len()),
            Node::Array(items) => format!("array of {}", items.len()),
        }
    }
}

impl Value for MemValue {
    fn field(&self, name: &'static str) -> Result<Self> {
        if let Node::Struct(fields) = &*self.0 {
            // Structs here are a handful of members; linear scan is fine.
            if let Some((_, v)) = fields.iter().find(|(n, _)| *n == name) {
                return Ok(v.clone());
            }
        }
        Err(Error::MissingField {
            name,
            on: self.describe(),
        })
    }

    fn index(&self, i: u64) -> Result<Self> {
        if let Node::Array(items) = &*self.0 {
            if let Some(v) = usize::try_from(i).ok().and_then(|i| items.get(i)) {
                return Ok(v.clone());
            }
        }
        Err(Error::IndexOutOfBounds {
            index: i,
            on: self.describe(),
        })
    }

    fn is_null(&self) -> bool {
        matches!(&*self.0, Node::Null)
    }

    fn as_u64(&self) -> Result<u64> {
        match &*self.0 {
            Node::Null => Ok(0),
            Node::UInt(v) => Ok(*v),
            Node::Int(v) => Ok(*v as u64),
            Node::Ptr { addr } | Node::CStr { addr, .. } => Ok(*addr),
            _ => Err(Error::NotAnInteger {
                on: self.describe(),
            }),
        }
    }

    fn as_i64(&self) -> Result<i64> {
        match &*self.0 {
            Node::Null => Ok(0),
            Node::UInt(v) => Ok(*v as i64),
            Node::Int(v) => Ok(*v),
            Node::Ptr { addr } | Node::CStr { addr, .. } => Ok(*addr as i64),
            _ => Err(Error::NotAnInteger {
                on: self.describe(),
            }),
        }
    }

    fn deref_cstr(&self) -> Result<String> {
        match &*self.0 {
            Node::CStr { text, .. } => Ok(text.clone()),
            _ => Err(Error::BadStringDeref {
                on: self.describe(),
            }),
        }
    }
}
