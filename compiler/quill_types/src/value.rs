//! Read-only view of runtime values.
//!
//! The type layer never owns values; the embedder exposes them through
//! these object-safe traits. Iteration is visitor-style so that hosts with
//! interior mutability (linked lists, hash tables) never have to hand out
//! borrows of their storage.

use crate::funcs::UserFuncRef;
use crate::TypeKind;

/// A runtime value, as much of it as inference needs.
pub trait ValueView {
    /// The value's raw kind, in the same discriminant space as types.
    fn kind(&self) -> TypeKind;

    /// The numeric payload, for `Number` values.
    fn as_number(&self) -> Option<i64> {
        None
    }

    /// The list payload, for `List` values. `None` stands for a null list.
    fn as_list(&self) -> Option<&dyn ListView> {
        None
    }

    /// The dict payload, for `Dict` values. `None` stands for a null dict.
    fn as_dict(&self) -> Option<&dyn DictView> {
        None
    }

    /// The function reference, for `Func` and `Partial` values.
    fn as_func(&self) -> Option<FuncValue<'_>> {
        None
    }
}

/// A runtime list.
pub trait ListView {
    fn is_empty(&self) -> bool;

    /// Check if this is the lazily-materialized range list.
    fn is_range(&self) -> bool {
        false
    }

    /// The cycle-detection stamp last written by [`set_visited_id`].
    ///
    /// [`set_visited_id`]: ListView::set_visited_id
    fn visited_id(&self) -> u32;

    /// Stamp this container as visited for the given inference pass.
    fn set_visited_id(&self, id: u32);

    /// Visit each item in order; the callback returns `false` to stop.
    fn visit_items(&self, visit: &mut dyn FnMut(&dyn ValueView) -> bool);
}

/// A runtime dict. Only values are visited; keys are always strings.
pub trait DictView {
    fn is_empty(&self) -> bool;

    /// The cycle-detection stamp last written by [`set_visited_id`].
    ///
    /// [`set_visited_id`]: DictView::set_visited_id
    fn visited_id(&self) -> u32;

    /// Stamp this container as visited for the given inference pass.
    fn set_visited_id(&self, id: u32);

    /// Visit each value; the callback returns `false` to stop.
    fn visit_values(&self, visit: &mut dyn FnMut(&dyn ValueView) -> bool);
}

/// The function reference carried by a `Func` or `Partial` value.
///
/// A plain funcref carries a name; a partial carries either its bound
/// user function or, when unresolved, a name.
#[derive(Copy, Clone, Debug)]
pub struct FuncValue<'a> {
    pub name: Option<&'a str>,
    pub func: Option<UserFuncRef>,
}

impl<'a> FuncValue<'a> {
    /// A reference by name, not yet resolved.
    pub fn named(name: &'a str) -> Self {
        FuncValue {
            name: Some(name),
            func: None,
        }
    }

    /// A reference to an already-resolved user function.
    pub fn bound(func: UserFuncRef) -> Self {
        FuncValue {
            name: None,
            func: Some(func),
        }
    }
}
