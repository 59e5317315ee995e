//! Type system for Quill's optional static type layer.
//!
//! Types live in a [`TypePool`] and are referenced by [`TypeIdx`] — a
//! 32-bit handle. Every pool is seeded with the canonical singletons at
//! fixed indices, so the common types (`number`, `list<string>`,
//! `func(): void`, ...) are shared and compare by index identity. Types
//! built during parsing, inference, and checking are scratch: a
//! [`PoolMark`] taken before the work releases them all afterwards. Types
//! that must outlive the scratch region — cached function signatures —
//! become [`DurableType`] deep copies that still share canonicals.
//!
//! The public surface:
//! - [`parse_type`] / [`skip_type`] — the textual type syntax
//! - [`infer_value`] / [`infer_host_var`] — a type for a runtime value
//! - [`check_type`] / [`check_value`] / [`check_args`] — assignability
//! - [`common_type`] / [`member_from_stack`] — least upper bound
//! - [`TypePool::type_name`] — rendering for diagnostics

mod check;
mod common;
mod durable;
mod flags;
mod funcs;
mod idx;
mod infer;
mod kind;
mod node;
mod parse;
mod pool;
mod value;

pub use check::{
    check_args, check_type, check_value, check_value_where, needs_bool_conversion, CheckResult,
    TypeMismatch, Where,
};
pub use common::{common_type, member_from_stack};
pub use durable::{DurableNode, DurableType};
pub use flags::TypeFlags;
pub use funcs::{
    CompileFailed, EmptyDirectory, FunctionDirectory, InternalFuncId, UserFuncRef,
};
pub use idx::TypeIdx;
pub use infer::{infer_host_var, infer_value, next_copy_id, value_type_name};
pub use kind::TypeKind;
pub use parse::{parse_type, skip_type, TypeCursor, MAX_FUNC_ARGS};
pub use pool::{opt_type_name, PoolMark, TypePool};
pub use value::{DictView, FuncValue, ListView, ValueView};

pub(crate) use node::TypeNode;

#[cfg(test)]
mod test_support;

