//! Type pool - canonical singletons plus an arena of scratch types.
//!
//! All types are stored here and referenced by [`TypeIdx`]. Every pool
//! starts with the canonical range seeded at fixed indices, so canonical
//! indices are portable across pools and compare by identity. Everything
//! above [`TypeIdx::FIRST_DYNAMIC`] is scratch: callers take a [`PoolMark`]
//! before a transient computation and [`reset`](TypePool::reset) to it
//! afterwards, releasing every node allocated since in one step.
//!
//! Composite canonicals only reference other canonicals; scratch nodes may
//! reference canonicals and earlier scratch nodes, never the other way
//! around, so truncation cannot dangle.

mod construct;
mod format;

pub use format::opt_type_name;

use crate::{TypeFlags, TypeIdx, TypeKind, TypeNode};

/// A snapshot of the pool's allocation point.
///
/// Obtained from [`TypePool::mark`]; passing it back to
/// [`TypePool::reset`] frees every type allocated since. Indices handed out
/// after the mark are invalid once reset.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct PoolMark(u32);

/// Pool of type nodes with the canonical range pre-seeded.
pub struct TypePool {
    nodes: Vec<TypeNode>,
}

impl TypePool {
    /// Create a new pool with the canonical types seeded.
    pub fn new() -> Self {
        let mut pool = TypePool {
            nodes: Vec::with_capacity(TypeIdx::FIRST_DYNAMIC as usize + 32),
        };
        pool.seed_canonicals();
        pool
    }

    /// Seed the canonical singletons at their fixed indices.
    fn seed_canonicals(&mut self) {
        use TypeKind as K;

        self.seed(TypeNode::scalar(K::Unknown), TypeIdx::UNKNOWN);
        self.seed(TypeNode::scalar(K::Any), TypeIdx::ANY);
        self.seed(TypeNode::scalar(K::Void), TypeIdx::VOID);
        self.seed(TypeNode::scalar(K::Special), TypeIdx::SPECIAL);
        self.seed(TypeNode::scalar(K::Bool), TypeIdx::BOOL);
        self.seed(TypeNode::scalar(K::Number), TypeIdx::NUMBER);
        self.seed(TypeNode::scalar(K::Float), TypeIdx::FLOAT);
        self.seed(TypeNode::scalar(K::String), TypeIdx::STRING);
        self.seed(TypeNode::scalar(K::Blob), TypeIdx::BLOB);
        self.seed(TypeNode::scalar(K::Job), TypeIdx::JOB);
        self.seed(TypeNode::scalar(K::Channel), TypeIdx::CHANNEL);
        self.seed(TypeNode::scalar(K::Instr), TypeIdx::INSTR);

        let mut number_bool = TypeNode::scalar(K::Number);
        number_bool.flags |= TypeFlags::BOOL_OK;
        self.seed(number_bool, TypeIdx::NUMBER_BOOL);

        self.seed(TypeNode::container(K::List, TypeIdx::ANY), TypeIdx::LIST_ANY);
        self.seed(
            TypeNode::container(K::List, TypeIdx::UNKNOWN),
            TypeIdx::LIST_EMPTY,
        );
        self.seed(
            TypeNode::container(K::List, TypeIdx::BOOL),
            TypeIdx::LIST_BOOL,
        );
        self.seed(
            TypeNode::container(K::List, TypeIdx::NUMBER),
            TypeIdx::LIST_NUMBER,
        );
        self.seed(
            TypeNode::container(K::List, TypeIdx::STRING),
            TypeIdx::LIST_STRING,
        );

        self.seed(TypeNode::container(K::Dict, TypeIdx::ANY), TypeIdx::DICT_ANY);
        self.seed(
            TypeNode::container(K::Dict, TypeIdx::UNKNOWN),
            TypeIdx::DICT_EMPTY,
        );
        self.seed(
            TypeNode::container(K::Dict, TypeIdx::BOOL),
            TypeIdx::DICT_BOOL,
        );
        self.seed(
            TypeNode::container(K::Dict, TypeIdx::NUMBER),
            TypeIdx::DICT_NUMBER,
        );
        self.seed(
            TypeNode::container(K::Dict, TypeIdx::STRING),
            TypeIdx::DICT_STRING,
        );

        self.seed(
            TypeNode::func(K::Func, TypeIdx::UNKNOWN, -1),
            TypeIdx::FUNC_UNKNOWN,
        );
        self.seed(
            TypeNode::func(K::Func, TypeIdx::VOID, -1),
            TypeIdx::FUNC_VOID,
        );
        self.seed(TypeNode::func(K::Func, TypeIdx::ANY, -1), TypeIdx::FUNC_ANY);
        self.seed(
            TypeNode::func(K::Func, TypeIdx::NUMBER, -1),
            TypeIdx::FUNC_NUMBER,
        );
        self.seed(
            TypeNode::func(K::Func, TypeIdx::STRING, -1),
            TypeIdx::FUNC_STRING,
        );
        self.seed(
            TypeNode::func(K::Func, TypeIdx::VOID, 0),
            TypeIdx::FUNC_0_VOID,
        );
        self.seed(TypeNode::func(K::Func, TypeIdx::ANY, 0), TypeIdx::FUNC_0_ANY);
        self.seed(
            TypeNode::func(K::Func, TypeIdx::NUMBER, 0),
            TypeIdx::FUNC_0_NUMBER,
        );
        self.seed(
            TypeNode::func(K::Func, TypeIdx::STRING, 0),
            TypeIdx::FUNC_0_STRING,
        );

        debug_assert_eq!(self.nodes.len() as u32, TypeIdx::FIRST_DYNAMIC);
    }

    /// Seed one canonical at its fixed index.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "canonical count is a small constant, always fits u32"
    )]
    fn seed(&mut self, node: TypeNode, expected_idx: TypeIdx) {
        let idx = TypeIdx::from_raw(self.nodes.len() as u32);
        debug_assert_eq!(idx, expected_idx, "canonical index mismatch");
        self.nodes.push(node.with_static());
    }

    // === Arena lifecycle ===

    /// Snapshot the current allocation point.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "node count always fits u32 — indices are u32"
    )]
    pub fn mark(&self) -> PoolMark {
        PoolMark(self.nodes.len() as u32)
    }

    /// Free every type allocated since `mark`.
    pub fn reset(&mut self, mark: PoolMark) {
        debug_assert!(mark.0 >= TypeIdx::FIRST_DYNAMIC);
        debug_assert!((mark.0 as usize) <= self.nodes.len());
        self.nodes.truncate(mark.0 as usize);
    }

    /// Free every scratch type, keeping only the canonical range.
    pub fn clear(&mut self) {
        self.nodes.truncate(TypeIdx::FIRST_DYNAMIC as usize);
    }

    /// Total number of types, canonicals included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A pool is never empty; the canonical range is always present.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a scratch node.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "node count always fits u32 — indices are u32"
    )]
    pub(crate) fn alloc(&mut self, node: TypeNode) -> TypeIdx {
        debug_assert!(!node.flags.is_static());
        let idx = TypeIdx::from_raw(self.nodes.len() as u32);
        self.nodes.push(node);
        idx
    }

    // === Queries ===

    pub(crate) fn node(&self, t: TypeIdx) -> &TypeNode {
        &self.nodes[t.raw() as usize]
    }

    /// The kind of a type.
    #[inline]
    pub fn kind(&self, t: TypeIdx) -> TypeKind {
        self.node(t).kind
    }

    /// The flags of a type.
    #[inline]
    pub fn flags(&self, t: TypeIdx) -> TypeFlags {
        self.node(t).flags
    }

    /// Element type for List/Dict, return type for Func/Partial.
    #[inline]
    pub fn member(&self, t: TypeIdx) -> Option<TypeIdx> {
        self.node(t).member
    }

    /// Declared arity; -1 = unknown.
    #[inline]
    pub fn arg_count(&self, t: TypeIdx) -> i32 {
        self.node(t).arg_count
    }

    /// Arity minus trailing optional arguments.
    #[inline]
    pub fn min_arg_count(&self, t: TypeIdx) -> i32 {
        self.node(t).min_arg_count
    }

    /// Declared argument types, when known.
    #[inline]
    pub fn args(&self, t: TypeIdx) -> Option<&[TypeIdx]> {
        self.node(t).args.as_deref()
    }

    // === Mutation (scratch nodes only) ===

    fn node_mut(&mut self, t: TypeIdx) -> &mut TypeNode {
        debug_assert!(!t.is_canonical(), "canonical types are immutable");
        &mut self.nodes[t.raw() as usize]
    }

    pub(crate) fn add_flags(&mut self, t: TypeIdx, flags: TypeFlags) {
        self.node_mut(t).flags |= flags;
    }

    pub(crate) fn set_min_arg_count(&mut self, t: TypeIdx, min_arg_count: i32) {
        self.node_mut(t).min_arg_count = min_arg_count;
    }

    // === Structural equality ===

    /// Check if two types are exactly the same, structurally.
    ///
    /// Flags are not compared; `number_bool` equals `number`.
    pub fn equal(&self, a: TypeIdx, b: TypeIdx) -> bool {
        if a == b {
            return true;
        }
        let na = self.node(a);
        let nb = self.node(b);
        if na.kind != nb.kind {
            return false;
        }
        match na.kind {
            TypeKind::List | TypeKind::Dict => self.equal_member(na.member, nb.member),
            TypeKind::Func | TypeKind::Partial => {
                if !self.equal_member(na.member, nb.member) || na.arg_count != nb.arg_count {
                    return false;
                }
                // An unknown signature on either side compares equal.
                match (na.arg_count, &na.args, &nb.args) {
                    (c, _, _) if c < 0 => true,
                    (_, Some(xs), Some(ys)) => {
                        xs.iter().zip(ys.iter()).all(|(&x, &y)| self.equal(x, y))
                    }
                    _ => true,
                }
            }
            _ => true,
        }
    }

    fn equal_member(&self, a: Option<TypeIdx>, b: Option<TypeIdx>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.equal(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}
