//! Type construction helpers for the pool.
//!
//! Constructors collapse to the matching canonical whenever the inputs
//! allow it, so common types compare by index identity.

use crate::{TypeIdx, TypeKind, TypeNode};

impl super::TypePool {
    /// The canonical for a non-composite value kind.
    ///
    /// Returns `None` for List/Dict/Func/Partial.
    pub fn scalar_of(&self, kind: TypeKind) -> Option<TypeIdx> {
        match kind {
            TypeKind::Unknown => Some(TypeIdx::UNKNOWN),
            TypeKind::Any => Some(TypeIdx::ANY),
            TypeKind::Void => Some(TypeIdx::VOID),
            TypeKind::Special => Some(TypeIdx::SPECIAL),
            TypeKind::Bool => Some(TypeIdx::BOOL),
            TypeKind::Number => Some(TypeIdx::NUMBER),
            TypeKind::Float => Some(TypeIdx::FLOAT),
            TypeKind::String => Some(TypeIdx::STRING),
            TypeKind::Blob => Some(TypeIdx::BLOB),
            TypeKind::Job => Some(TypeIdx::JOB),
            TypeKind::Channel => Some(TypeIdx::CHANNEL),
            TypeKind::Instr => Some(TypeIdx::INSTR),
            TypeKind::List | TypeKind::Dict | TypeKind::Func | TypeKind::Partial => None,
        }
    }

    /// Create a list type with the given member.
    pub fn list_of(&mut self, member: TypeIdx) -> TypeIdx {
        // recognize commonly used types
        match self.kind(member) {
            TypeKind::Any => return TypeIdx::LIST_ANY,
            TypeKind::Void | TypeKind::Unknown => return TypeIdx::LIST_EMPTY,
            TypeKind::Bool => return TypeIdx::LIST_BOOL,
            TypeKind::Number => return TypeIdx::LIST_NUMBER,
            TypeKind::String => return TypeIdx::LIST_STRING,
            _ => {}
        }
        self.alloc(TypeNode::container(TypeKind::List, member))
    }

    /// Create a dict type with the given member.
    pub fn dict_of(&mut self, member: TypeIdx) -> TypeIdx {
        // recognize commonly used types
        match self.kind(member) {
            TypeKind::Any => return TypeIdx::DICT_ANY,
            TypeKind::Void | TypeKind::Unknown => return TypeIdx::DICT_EMPTY,
            TypeKind::Bool => return TypeIdx::DICT_BOOL,
            TypeKind::Number => return TypeIdx::DICT_NUMBER,
            TypeKind::String => return TypeIdx::DICT_STRING,
            _ => {}
        }
        self.alloc(TypeNode::container(TypeKind::Dict, member))
    }

    /// Get a function type for the given return type.
    ///
    /// With `arg_count <= 0` a canonical can be used; a positive arity
    /// always allocates so that argument types can be added.
    pub fn func_of(&mut self, ret: TypeIdx, arg_count: i32) -> TypeIdx {
        // recognize commonly used types
        if arg_count <= 0 {
            match ret {
                // (arg_count == 0) does not occur with an unknown return
                TypeIdx::UNKNOWN => return TypeIdx::FUNC_UNKNOWN,
                TypeIdx::VOID => {
                    return if arg_count == 0 {
                        TypeIdx::FUNC_0_VOID
                    } else {
                        TypeIdx::FUNC_VOID
                    }
                }
                TypeIdx::ANY => {
                    return if arg_count == 0 {
                        TypeIdx::FUNC_0_ANY
                    } else {
                        TypeIdx::FUNC_ANY
                    }
                }
                TypeIdx::NUMBER => {
                    return if arg_count == 0 {
                        TypeIdx::FUNC_0_NUMBER
                    } else {
                        TypeIdx::FUNC_NUMBER
                    }
                }
                TypeIdx::STRING => {
                    return if arg_count == 0 {
                        TypeIdx::FUNC_0_STRING
                    } else {
                        TypeIdx::FUNC_STRING
                    }
                }
                _ => {}
            }
        }

        self.alloc_func(ret, arg_count)
    }

    /// Allocate a fresh function type, never a canonical.
    pub fn alloc_func(&mut self, ret: TypeIdx, arg_count: i32) -> TypeIdx {
        self.alloc(TypeNode::func(TypeKind::Func, ret, arg_count))
    }

    /// Attach declared argument types to a function allocated with
    /// [`alloc_func`](Self::alloc_func).
    pub fn set_func_args(&mut self, func: TypeIdx, args: &[TypeIdx]) {
        debug_assert!(self.kind(func).is_callable());
        debug_assert_eq!(args.len() as i64, i64::from(self.arg_count(func).max(0)));
        self.node_mut(func).args = Some(args.to_vec());
    }
}
