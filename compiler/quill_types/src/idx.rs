//! Type index handle.
//!
//! `TypeIdx` is the type representation: every type lives in a [`TypePool`]
//! and is referenced by its 32-bit index. Canonical types are pre-seeded at
//! fixed indices in every pool, so a canonical index is valid in any pool
//! and index equality on the canonical range is identity on the shared
//! singleton.
//!
//! [`TypePool`]: crate::TypePool

use std::fmt;

/// A 32-bit index into a type pool.
///
/// Indices below [`TypeIdx::FIRST_DYNAMIC`] are the canonical singletons;
/// everything above is pool-owned scratch.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct TypeIdx(u32);

impl TypeIdx {
    // === Scalar canonicals (indices 0-12) ===

    /// The bottom sentinel: not yet known, assignable to and from anything.
    pub const UNKNOWN: Self = Self(0);
    /// The explicit `any` type.
    pub const ANY: Self = Self(1);
    /// The `void` type.
    pub const VOID: Self = Self(2);
    /// The special-constant type (`null` and friends).
    pub const SPECIAL: Self = Self(3);
    /// The `bool` type.
    pub const BOOL: Self = Self(4);
    /// The `number` type.
    pub const NUMBER: Self = Self(5);
    /// The `float` type.
    pub const FLOAT: Self = Self(6);
    /// The `string` type.
    pub const STRING: Self = Self(7);
    /// The `blob` type.
    pub const BLOB: Self = Self(8);
    /// The `job` type.
    pub const JOB: Self = Self(9);
    /// The `channel` type.
    pub const CHANNEL: Self = Self(10);
    /// The instruction-list type.
    pub const INSTR: Self = Self(11);
    /// `number` restricted to the literals 0 and 1, accepted where `bool`
    /// is expected.
    pub const NUMBER_BOOL: Self = Self(12);

    // === List canonicals (13-17) ===

    /// `list<any>`.
    pub const LIST_ANY: Self = Self(13);
    /// An empty list: `list` with an unknown member.
    pub const LIST_EMPTY: Self = Self(14);
    /// `list<bool>`.
    pub const LIST_BOOL: Self = Self(15);
    /// `list<number>`.
    pub const LIST_NUMBER: Self = Self(16);
    /// `list<string>`.
    pub const LIST_STRING: Self = Self(17);

    // === Dict canonicals (18-22) ===

    /// `dict<any>`.
    pub const DICT_ANY: Self = Self(18);
    /// An empty dict: `dict` with an unknown member.
    pub const DICT_EMPTY: Self = Self(19);
    /// `dict<bool>`.
    pub const DICT_BOOL: Self = Self(20);
    /// `dict<number>`.
    pub const DICT_NUMBER: Self = Self(21);
    /// `dict<string>`.
    pub const DICT_STRING: Self = Self(22);

    // === Func canonicals (23-31) ===

    /// Bare `func`: unknown return, unknown arity.
    pub const FUNC_UNKNOWN: Self = Self(23);
    /// `func` with void return, unknown arity.
    pub const FUNC_VOID: Self = Self(24);
    /// `func` with any return, unknown arity.
    pub const FUNC_ANY: Self = Self(25);
    /// `func` with number return, unknown arity.
    pub const FUNC_NUMBER: Self = Self(26);
    /// `func` with string return, unknown arity.
    pub const FUNC_STRING: Self = Self(27);
    /// `func()`: zero arity, void return.
    pub const FUNC_0_VOID: Self = Self(28);
    /// `func(): any`.
    pub const FUNC_0_ANY: Self = Self(29);
    /// `func(): number`.
    pub const FUNC_0_NUMBER: Self = Self(30);
    /// `func(): string`.
    pub const FUNC_0_STRING: Self = Self(31);

    /// First index for pool-allocated types.
    pub const FIRST_DYNAMIC: u32 = 32;

    /// Create an index from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in the pool it is used
    /// with.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a canonical singleton (pre-seeded, `STATIC`).
    #[inline]
    pub const fn is_canonical(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }
}

impl fmt::Debug for TypeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::UNKNOWN => write!(f, "TypeIdx::UNKNOWN"),
            Self::ANY => write!(f, "TypeIdx::ANY"),
            Self::VOID => write!(f, "TypeIdx::VOID"),
            Self::SPECIAL => write!(f, "TypeIdx::SPECIAL"),
            Self::BOOL => write!(f, "TypeIdx::BOOL"),
            Self::NUMBER => write!(f, "TypeIdx::NUMBER"),
            Self::FLOAT => write!(f, "TypeIdx::FLOAT"),
            Self::STRING => write!(f, "TypeIdx::STRING"),
            Self::BLOB => write!(f, "TypeIdx::BLOB"),
            Self::JOB => write!(f, "TypeIdx::JOB"),
            Self::CHANNEL => write!(f, "TypeIdx::CHANNEL"),
            Self::INSTR => write!(f, "TypeIdx::INSTR"),
            Self::NUMBER_BOOL => write!(f, "TypeIdx::NUMBER_BOOL"),
            Self::LIST_ANY => write!(f, "TypeIdx::LIST_ANY"),
            Self::LIST_EMPTY => write!(f, "TypeIdx::LIST_EMPTY"),
            Self::LIST_BOOL => write!(f, "TypeIdx::LIST_BOOL"),
            Self::LIST_NUMBER => write!(f, "TypeIdx::LIST_NUMBER"),
            Self::LIST_STRING => write!(f, "TypeIdx::LIST_STRING"),
            Self::DICT_ANY => write!(f, "TypeIdx::DICT_ANY"),
            Self::DICT_EMPTY => write!(f, "TypeIdx::DICT_EMPTY"),
            Self::DICT_BOOL => write!(f, "TypeIdx::DICT_BOOL"),
            Self::DICT_NUMBER => write!(f, "TypeIdx::DICT_NUMBER"),
            Self::DICT_STRING => write!(f, "TypeIdx::DICT_STRING"),
            Self::FUNC_UNKNOWN => write!(f, "TypeIdx::FUNC_UNKNOWN"),
            Self::FUNC_VOID => write!(f, "TypeIdx::FUNC_VOID"),
            Self::FUNC_ANY => write!(f, "TypeIdx::FUNC_ANY"),
            Self::FUNC_NUMBER => write!(f, "TypeIdx::FUNC_NUMBER"),
            Self::FUNC_STRING => write!(f, "TypeIdx::FUNC_STRING"),
            Self::FUNC_0_VOID => write!(f, "TypeIdx::FUNC_0_VOID"),
            Self::FUNC_0_ANY => write!(f, "TypeIdx::FUNC_0_ANY"),
            Self::FUNC_0_NUMBER => write!(f, "TypeIdx::FUNC_0_NUMBER"),
            Self::FUNC_0_STRING => write!(f, "TypeIdx::FUNC_0_STRING"),
            _ => write!(f, "TypeIdx({})", self.0),
        }
    }
}

// Compile-time size assertion: TypeIdx must be exactly 4 bytes
const _: () = assert!(std::mem::size_of::<TypeIdx>() == 4);
