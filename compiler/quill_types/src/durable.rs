//! Durable types: individually-owned copies that outlive any arena.
//!
//! A pool type dies with its pool (or at the next `reset`). Long-lived
//! consumers — cached function signatures above all — take a deep copy
//! instead. Canonicals are never copied: they are shared by reference in
//! every pool, so the copy stops at `STATIC` nodes. Freeing is `Drop`.

use crate::{TypeFlags, TypeIdx, TypeKind, TypeNode, TypePool};

/// A type owned outside any pool.
#[derive(Clone, Debug)]
pub enum DurableType {
    /// A canonical singleton, shared rather than copied.
    Canonical(TypeIdx),
    /// An owned node, recursing through member and argument types.
    Owned(Box<DurableNode>),
}

/// The owned payload of a non-canonical durable type.
#[derive(Clone, Debug)]
pub struct DurableNode {
    pub kind: TypeKind,
    pub flags: TypeFlags,
    pub member: Option<DurableType>,
    pub arg_count: i32,
    pub min_arg_count: i32,
    pub args: Option<Vec<DurableType>>,
}

impl DurableType {
    /// Deep-copy a pool type into standalone ownership.
    ///
    /// `STATIC` nodes are returned as shared canonicals, unchanged.
    pub fn from_pool(pool: &TypePool, t: TypeIdx) -> Self {
        if pool.flags(t).is_static() {
            return DurableType::Canonical(t);
        }

        let member = pool.member(t).map(|m| Self::from_pool(pool, m));
        let args = pool
            .args(t)
            .map(|args| args.iter().map(|&arg| Self::from_pool(pool, arg)).collect());

        DurableType::Owned(Box::new(DurableNode {
            kind: pool.kind(t),
            flags: pool.flags(t),
            member,
            arg_count: pool.arg_count(t),
            min_arg_count: pool.min_arg_count(t),
            args,
        }))
    }

    /// Re-enter a pool, allocating scratch nodes for the owned parts.
    pub fn instantiate(&self, pool: &mut TypePool) -> TypeIdx {
        match self {
            DurableType::Canonical(idx) => *idx,
            DurableType::Owned(node) => {
                let member = node.member.as_ref().map(|m| m.instantiate(pool));
                let args = node
                    .args
                    .as_ref()
                    .map(|args| args.iter().map(|arg| arg.instantiate(pool)).collect());
                pool.alloc(TypeNode {
                    kind: node.kind,
                    flags: node.flags,
                    member,
                    arg_count: node.arg_count,
                    min_arg_count: node.min_arg_count,
                    args,
                })
            }
        }
    }

}
