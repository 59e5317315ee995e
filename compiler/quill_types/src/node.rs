//! Type node storage.

use crate::{TypeFlags, TypeIdx, TypeKind};

/// A single type in a pool.
///
/// Invariants:
/// - List/Dict: `member` is set, `arg_count` is 0, `args` is `None`.
/// - Func/Partial: `member` is the return type (`UNKNOWN` when unknown);
///   `args` is `None` for an unknown signature, otherwise exactly
///   `arg_count` entries with `arg_count >= 0`.
/// - `0 <= min_arg_count <= max(arg_count, 0)`.
/// - `VARIADIC` implies `arg_count >= 1` and the last argument is the list
///   carrying the variadic element type.
#[derive(Clone, Debug)]
pub struct TypeNode {
    pub kind: TypeKind,
    pub flags: TypeFlags,
    /// Element type for List/Dict, return type for Func/Partial.
    pub member: Option<TypeIdx>,
    /// Declared arity including a variadic last argument; -1 = unknown.
    pub arg_count: i32,
    /// Arity minus trailing optional arguments.
    pub min_arg_count: i32,
    /// Declared argument types, when known.
    pub args: Option<Vec<TypeIdx>>,
}

impl TypeNode {
    /// A node with no member and no signature.
    pub fn scalar(kind: TypeKind) -> Self {
        TypeNode {
            kind,
            flags: TypeFlags::empty(),
            member: None,
            arg_count: 0,
            min_arg_count: 0,
            args: None,
        }
    }

    /// A list or dict node with the given member.
    pub fn container(kind: TypeKind, member: TypeIdx) -> Self {
        debug_assert!(matches!(kind, TypeKind::List | TypeKind::Dict));
        TypeNode {
            kind,
            flags: TypeFlags::empty(),
            member: Some(member),
            arg_count: 0,
            min_arg_count: 0,
            args: None,
        }
    }

    /// A func or partial node with the given return type and arity, no
    /// argument types yet.
    pub fn func(kind: TypeKind, ret: TypeIdx, arg_count: i32) -> Self {
        debug_assert!(kind.is_callable());
        TypeNode {
            kind,
            flags: TypeFlags::empty(),
            member: Some(ret),
            arg_count,
            min_arg_count: arg_count.max(0),
            args: None,
        }
    }

    /// Mark this node as a canonical singleton.
    pub(crate) fn with_static(mut self) -> Self {
        self.flags |= TypeFlags::STATIC;
        self
    }
}
