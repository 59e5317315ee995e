//! Least upper bound over the type lattice.

use smallvec::SmallVec;

use crate::{TypeIdx, TypeKind, TypePool};

/// Find the common type of `a` and `b`.
///
/// Structurally equal operands return `a`; an `unknown` operand (an empty
/// list or dict has no specific type) yields the other; matching composite
/// kinds recurse; everything else widens to `any`.
pub fn common_type(pool: &mut TypePool, a: TypeIdx, b: TypeIdx) -> TypeIdx {
    if pool.equal(a, b) {
        return a;
    }

    if pool.kind(a) == TypeKind::Unknown {
        return b;
    }
    if pool.kind(b) == TypeKind::Unknown {
        return a;
    }

    if pool.kind(a) == pool.kind(b) {
        match pool.kind(a) {
            TypeKind::List | TypeKind::Dict => {
                if let (Some(am), Some(bm)) = (pool.member(a), pool.member(b)) {
                    let member = common_type(pool, am, bm);
                    return if pool.kind(a) == TypeKind::List {
                        pool.list_of(member)
                    } else {
                        pool.dict_of(member)
                    };
                }
            }
            TypeKind::Func => {
                if let (Some(am), Some(bm)) = (pool.member(a), pool.member(b)) {
                    let ret = common_type(pool, am, bm);

                    let a_argc = pool.arg_count(a);
                    let b_argc = pool.arg_count(b);
                    let dest = if a_argc == b_argc && a_argc >= 0 {
                        let dest = pool.alloc_func(ret, a_argc);
                        let pairs: Option<SmallVec<[(TypeIdx, TypeIdx); 8]>> =
                            match (pool.args(a), pool.args(b)) {
                                (Some(xs), Some(ys)) => {
                                    Some(xs.iter().copied().zip(ys.iter().copied()).collect())
                                }
                                _ => None,
                            };
                        if let Some(pairs) = pairs {
                            let mut merged: SmallVec<[TypeIdx; 8]> = SmallVec::new();
                            for (x, y) in pairs {
                                merged.push(common_type(pool, x, y));
                            }
                            pool.set_func_args(dest, &merged);
                        }
                        dest
                    } else {
                        pool.alloc_func(ret, -1)
                    };

                    // Use the minimum of min_arg_count.
                    let min = pool.min_arg_count(a).min(pool.min_arg_count(b));
                    pool.set_min_arg_count(dest, min);
                    return dest;
                }
            }
            _ => {}
        }
    }

    TypeIdx::ANY
}

/// The member type of a list or dict from the items on a type stack.
///
/// `stack` ends at the top; `count` entries are inspected. For a list
/// `stride` is 1; for a dict it is 2 and keys are skipped. Returns
/// `unknown` for an empty collection, otherwise the common type of all
/// items, short-circuiting once it widens to `any`.
pub fn member_from_stack(
    pool: &mut TypePool,
    stack: &[TypeIdx],
    count: usize,
    stride: usize,
) -> TypeIdx {
    if count == 0 {
        return TypeIdx::UNKNOWN;
    }

    // Use the first value type, then find the common type with the rest.
    let top = stack.len();
    let mut result = stack[top - count * stride + stride - 1];
    for i in 1..count {
        if result == TypeIdx::ANY {
            break; // won't get more common
        }
        let item = stack[top - (count - i) * stride + stride - 1];
        result = common_type(pool, item, result);
    }

    result
}
