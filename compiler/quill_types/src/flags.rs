//! Per-type metadata flags.

use bitflags::bitflags;

bitflags! {
    /// Flags attached to a type node.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeFlags: u8 {
        /// A canonical singleton: never freed, never mutated. Composite
        /// canonicals only reference other `STATIC` types.
        const STATIC = 1 << 0;
        /// The last declared argument accepts zero or more values of its
        /// element type.
        const VARIADIC = 1 << 1;
        /// A `number` produced from the literal 0 or 1; accepted where
        /// `bool` is expected.
        const BOOL_OK = 1 << 2;
    }
}

impl TypeFlags {
    /// Check if the `STATIC` flag is set.
    #[inline]
    pub const fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    /// Check if the `VARIADIC` flag is set.
    #[inline]
    pub const fn is_variadic(self) -> bool {
        self.contains(Self::VARIADIC)
    }

    /// Check if the `BOOL_OK` flag is set.
    #[inline]
    pub const fn is_bool_ok(self) -> bool {
        self.contains(Self::BOOL_OK)
    }
}
