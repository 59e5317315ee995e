//! Function directory interface.
//!
//! Inference resolves function values through the embedder's directory:
//! internal (built-in) functions expose a return type, user functions
//! expose a cached signature that may first require compiling the function
//! body (argument defaults determine argument types).

use std::fmt;

use crate::{DurableType, TypeIdx, TypePool};

/// Identifies an internal (built-in) function.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct InternalFuncId(u32);

impl InternalFuncId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Identifies a user-defined function.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct UserFuncRef(u32);

impl UserFuncRef {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Compiling a user function failed.
///
/// The directory reports the details through its own diagnostics; for the
/// type layer the failure is only a reason to give up on inference.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CompileFailed;

impl fmt::Display for CompileFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("function compilation failed")
    }
}

impl std::error::Error for CompileFailed {}

/// The embedder's function registry.
pub trait FunctionDirectory {
    /// Look up an internal function by name.
    fn find_internal(&self, name: &str) -> Option<InternalFuncId>;

    /// The return type of an internal function, allocated in `pool` when
    /// composite.
    fn internal_ret_type(&self, id: InternalFuncId, pool: &mut TypePool) -> TypeIdx;

    /// Look up a user function by name.
    fn find_user(&self, name: &str) -> Option<UserFuncRef>;

    /// Compile the function if it is still waiting to be compiled.
    fn ensure_compiled(&mut self, func: UserFuncRef) -> Result<(), CompileFailed>;

    /// Build and cache the function's signature if not cached yet.
    fn synthesize_signature(&mut self, func: UserFuncRef);

    /// The cached signature, if one exists.
    fn cached_signature(&self, func: UserFuncRef) -> Option<&DurableType>;
}

/// A directory with no functions, for embedders without callables.
#[derive(Copy, Clone, Debug, Default)]
pub struct EmptyDirectory;

impl FunctionDirectory for EmptyDirectory {
    fn find_internal(&self, _name: &str) -> Option<InternalFuncId> {
        None
    }

    fn internal_ret_type(&self, _id: InternalFuncId, _pool: &mut TypePool) -> TypeIdx {
        TypeIdx::ANY
    }

    fn find_user(&self, _name: &str) -> Option<UserFuncRef> {
        None
    }

    fn ensure_compiled(&mut self, _func: UserFuncRef) -> Result<(), CompileFailed> {
        Ok(())
    }

    fn synthesize_signature(&mut self, _func: UserFuncRef) {}

    fn cached_signature(&self, _func: UserFuncRef) -> Option<&DurableType> {
        None
    }
}
