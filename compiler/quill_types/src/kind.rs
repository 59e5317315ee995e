//! Type kind discriminant.

use std::fmt;

/// The kind of a type.
///
/// Values carry the same discriminant: a runtime value's raw kind is a
/// `TypeKind`, and the fallback inference path turns it into a type node
/// directly.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum TypeKind {
    /// Not yet known. As an expected type it accepts anything; as a
    /// list/dict member it marks an empty collection; as a func return it
    /// marks an unknown return type.
    Unknown = 0,
    /// Explicitly untyped. Accepts anything except `void`.
    Any,
    Void,
    /// Special constants (`null` and friends).
    Special,
    Bool,
    Number,
    Float,
    String,
    Blob,
    Job,
    Channel,
    /// Compiled instruction list.
    Instr,
    List,
    Dict,
    Func,
    /// A partial application; assignable where `func` is expected.
    Partial,
}

impl TypeKind {
    /// The keyword used in diagnostics and formatted type names.
    pub fn name(self) -> &'static str {
        match self {
            TypeKind::Unknown => "unknown",
            TypeKind::Any => "any",
            TypeKind::Void => "void",
            TypeKind::Special => "special",
            TypeKind::Bool => "bool",
            TypeKind::Number => "number",
            TypeKind::Float => "float",
            TypeKind::String => "string",
            TypeKind::Blob => "blob",
            TypeKind::Job => "job",
            TypeKind::Channel => "channel",
            TypeKind::Instr => "instr",
            TypeKind::List => "list",
            TypeKind::Dict => "dict",
            TypeKind::Func | TypeKind::Partial => "func",
        }
    }

    /// Check if this kind carries a member type (element or return).
    pub fn has_member(self) -> bool {
        matches!(
            self,
            TypeKind::List | TypeKind::Dict | TypeKind::Func | TypeKind::Partial
        )
    }

    /// Check if this kind is callable.
    pub fn is_callable(self) -> bool {
        matches!(self, TypeKind::Func | TypeKind::Partial)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
