//! Inferring a type from a runtime value.
//!
//! Containers are walked recursively, folding element types with the
//! common type. Value graphs can be cyclic; each container carries a
//! visited stamp that is compared against a process-wide pass counter, so
//! a container seen twice in one pass widens to `any` instead of
//! recursing forever. The counter is bumped once per inference root by
//! [`next_copy_id`], which also invalidates every stamp from earlier
//! passes.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::common::common_type;
use crate::pool::opt_type_name;
use crate::{FunctionDirectory, TypeIdx, TypeKind, TypeNode, TypePool, ValueView};

static COPY_ID: AtomicU32 = AtomicU32::new(0);

/// A fresh cycle-detection stamp for one inference pass.
///
/// Call once per root; recursive calls share the root's stamp.
pub fn next_copy_id() -> u32 {
    COPY_ID.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
}

/// Get a type for a runtime value.
///
/// Scratch types go into `pool`. With `deep` false the members of lists
/// and dicts are not inspected and widen to `any`. Returns `None` only
/// when a required directory operation (function compilation) fails.
#[tracing::instrument(level = "trace", skip(value, pool, directory))]
pub fn infer_value(
    value: &dyn ValueView,
    copy_id: u32,
    pool: &mut TypePool,
    directory: &mut dyn FunctionDirectory,
    deep: bool,
) -> Option<TypeIdx> {
    let inferred = infer_value_inner(value, copy_id, pool, directory, deep)?;

    // The literals 0 and 1 can also be used for bool.
    if inferred != TypeIdx::BOOL
        && value.kind() == TypeKind::Number
        && matches!(value.as_number(), Some(0 | 1))
    {
        return Some(TypeIdx::NUMBER_BOOL);
    }
    Some(inferred)
}

fn infer_value_inner(
    value: &dyn ValueView,
    copy_id: u32,
    pool: &mut TypePool,
    directory: &mut dyn FunctionDirectory,
    deep: bool,
) -> Option<TypeIdx> {
    let kind = value.kind();
    match kind {
        TypeKind::List => {
            let Some(list) = value.as_list() else {
                return Some(TypeIdx::LIST_EMPTY);
            };
            if list.is_empty() {
                return Some(TypeIdx::LIST_EMPTY);
            }
            if !deep {
                return Some(TypeIdx::LIST_ANY);
            }
            if list.is_range() {
                return Some(TypeIdx::LIST_NUMBER);
            }
            if list.visited_id() == copy_id {
                // avoid recursion
                return Some(TypeIdx::LIST_ANY);
            }
            list.set_visited_id(copy_id);

            // Use the common type of all members.
            let mut member: Option<TypeIdx> = None;
            let mut failed = false;
            list.visit_items(&mut |item| {
                match infer_value(item, copy_id, pool, directory, true) {
                    Some(item_type) => {
                        member = Some(match member {
                            None => item_type,
                            Some(so_far) => common_type(pool, item_type, so_far),
                        });
                        true
                    }
                    None => {
                        failed = true;
                        false
                    }
                }
            });
            if failed {
                return None;
            }
            Some(pool.list_of(member.unwrap_or(TypeIdx::ANY)))
        }

        TypeKind::Dict => {
            let Some(dict) = value.as_dict() else {
                return Some(TypeIdx::DICT_EMPTY);
            };
            if dict.is_empty() {
                return Some(TypeIdx::DICT_EMPTY);
            }
            if !deep {
                return Some(TypeIdx::DICT_ANY);
            }
            if dict.visited_id() == copy_id {
                // avoid recursion
                return Some(TypeIdx::DICT_ANY);
            }
            dict.set_visited_id(copy_id);

            // Use the common type of all values.
            let mut member: Option<TypeIdx> = None;
            let mut failed = false;
            dict.visit_values(&mut |item| {
                match infer_value(item, copy_id, pool, directory, true) {
                    Some(item_type) => {
                        member = Some(match member {
                            None => item_type,
                            Some(so_far) => common_type(pool, item_type, so_far),
                        });
                        true
                    }
                    None => {
                        failed = true;
                        false
                    }
                }
            });
            if failed {
                return None;
            }
            Some(pool.dict_of(member.unwrap_or(TypeIdx::ANY)))
        }

        TypeKind::Func | TypeKind::Partial => {
            let mut arg_count = 0;
            let mut member = TypeIdx::ANY;

            if let Some(func_value) = value.as_func() {
                let mut user = func_value.func;
                if let Some(name) = func_value.name {
                    if let Some(id) = directory.find_internal(name) {
                        // Argument types of internals are not tracked.
                        arg_count = -1;
                        member = directory.internal_ret_type(id, pool);
                    } else {
                        user = directory.find_user(name);
                    }
                }
                if let Some(func) = user {
                    // Getting argument types from default values may
                    // require compiling the function first.
                    directory.ensure_compiled(func).ok()?;
                    directory.synthesize_signature(func);
                    if let Some(signature) = directory.cached_signature(func) {
                        return Some(signature.instantiate(pool));
                    }
                }
            }

            Some(pool.alloc(TypeNode::func(kind, member, arg_count)))
        }

        _ => pool.scalar_of(kind),
    }
}

/// Get a type for a host variable.
///
/// Known-shape host containers short-circuit; everything else is a fresh
/// deep inference pass.
pub fn infer_host_var(
    value: &dyn ValueView,
    pool: &mut TypePool,
    directory: &mut dyn FunctionDirectory,
) -> Option<TypeIdx> {
    match value.kind() {
        TypeKind::List => Some(TypeIdx::LIST_STRING), // e.g. the recent-files list
        TypeKind::Dict => Some(TypeIdx::DICT_ANY),    // e.g. the completion-item dict
        _ => infer_value(value, next_copy_id(), pool, directory, true),
    }
}

/// The `typename()` builtin: the formatted name of a value's type.
///
/// Inference runs in a scratch region that is torn down before returning.
pub fn value_type_name(
    value: &dyn ValueView,
    pool: &mut TypePool,
    directory: &mut dyn FunctionDirectory,
) -> String {
    let mark = pool.mark();
    let inferred = infer_value(value, next_copy_id(), pool, directory, true);
    let name = opt_type_name(pool, inferred);
    pool.reset(mark);
    name
}

#[cfg(test)]
mod tests;
