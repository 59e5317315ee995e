//! Structural assignability checks.
//!
//! One diagnostic per failed check, at the outermost failure site: the
//! recursive member and argument checks run quiet and the caller reports
//! with the full expected/actual rendering.

use quill_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};

use crate::infer::{infer_value, next_copy_id};
use crate::{FunctionDirectory, TypeIdx, TypeKind, TypePool, ValueView};

/// Which site a check is for; selects the diagnostic wording.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Where {
    /// 1-based argument or variable number; 0 when not applicable.
    pub index: i32,
    /// Variable site rather than argument site.
    pub is_variable: bool,
}

impl Where {
    /// An argument site.
    pub fn argument(index: i32) -> Self {
        Where {
            index,
            is_variable: false,
        }
    }

    /// A variable site.
    pub fn variable(index: i32) -> Self {
        Where {
            index,
            is_variable: true,
        }
    }
}

/// Marker for a failed check; the diagnostic carries the details.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct TypeMismatch;

/// Result of an assignability check.
pub type CheckResult = Result<(), TypeMismatch>;

/// Check if the expected and actual types match.
///
/// Does not allow assigning `any` to a specific type. With `give_msg` a
/// failure emits one diagnostic, worded for `where_`.
pub fn check_type(
    pool: &TypePool,
    expected: TypeIdx,
    actual: TypeIdx,
    queue: &mut DiagnosticQueue,
    give_msg: bool,
    where_: Where,
) -> CheckResult {
    let mut ret = Ok(());

    let expected_kind = pool.kind(expected);
    let actual_kind = pool.kind(actual);

    // When expected is "unknown" we accept any actual type.
    // When expected is "any" we accept any actual type except "void".
    if expected_kind != TypeKind::Unknown
        && !(expected_kind == TypeKind::Any && actual_kind != TypeKind::Void)
    {
        // Kinds have to match, except that a partial can be assigned to a
        // variable with type "func".
        if !(expected_kind == actual_kind
            || (expected_kind == TypeKind::Func && actual_kind == TypeKind::Partial))
        {
            if expected_kind == TypeKind::Bool && pool.flags(actual).is_bool_ok() {
                // Using number 0 or 1 for bool is OK.
                return Ok(());
            }
            if give_msg {
                emit_mismatch(pool, expected, actual, queue, where_);
            }
            return Err(TypeMismatch);
        }

        if matches!(expected_kind, TypeKind::List | TypeKind::Dict) {
            // "unknown" is used for an empty list or dict.
            if let (Some(expected_member), Some(actual_member)) =
                (pool.member(expected), pool.member(actual))
            {
                if pool.kind(actual_member) != TypeKind::Unknown {
                    ret = check_type(pool, expected_member, actual_member, queue, false, where_);
                }
            }
        } else if expected_kind == TypeKind::Func {
            // If the return type is unknown it can be anything, including
            // nothing, so there is no point in checking.
            if let (Some(expected_ret), Some(actual_ret)) =
                (pool.member(expected), pool.member(actual))
            {
                if expected_ret != TypeIdx::UNKNOWN && actual_ret != TypeIdx::UNKNOWN {
                    ret = check_type(pool, expected_ret, actual_ret, queue, false, where_);
                }
            }
            if ret.is_ok() {
                let expected_argc = pool.arg_count(expected);
                let actual_argc = pool.arg_count(actual);
                if expected_argc != -1
                    && actual_argc != -1
                    && (actual_argc < pool.min_arg_count(expected) || actual_argc > expected_argc)
                {
                    ret = Err(TypeMismatch);
                }
            }
            if ret.is_ok() {
                if let (Some(expected_args), Some(actual_args)) =
                    (pool.args(expected), pool.args(actual))
                {
                    for (&expected_arg, &actual_arg) in expected_args.iter().zip(actual_args) {
                        // Allow for an "any" argument type, lambdas have
                        // them for untyped parameters.
                        if actual_arg != TypeIdx::ANY
                            && check_type(pool, expected_arg, actual_arg, queue, false, where_)
                                .is_err()
                        {
                            ret = Err(TypeMismatch);
                            break;
                        }
                    }
                }
            }
        }

        if ret.is_err() && give_msg {
            emit_mismatch(pool, expected, actual, queue, where_);
        }
    }

    ret
}

fn emit_mismatch(
    pool: &TypePool,
    expected: TypeIdx,
    actual: TypeIdx,
    queue: &mut DiagnosticQueue,
    where_: Where,
) {
    let expected_name = pool.type_name(expected);
    let actual_name = pool.type_name(actual);
    let message = if where_.index > 0 {
        let site = if where_.is_variable {
            "variable"
        } else {
            "argument"
        };
        format!(
            "{site} {}: type mismatch, expected {expected_name} but got {actual_name}",
            where_.index
        )
    } else {
        format!("type mismatch, expected {expected_name} but got {actual_name}")
    };
    queue.emit(Diagnostic::error(ErrorCode::E2001).with_message(message));
}

/// Check a runtime value against an expected type at an argument site.
pub fn check_value(
    pool: &mut TypePool,
    expected: TypeIdx,
    value: &dyn ValueView,
    directory: &mut dyn FunctionDirectory,
    queue: &mut DiagnosticQueue,
    arg_idx: i32,
) -> CheckResult {
    check_value_where(pool, expected, value, directory, queue, Where::argument(arg_idx))
}

/// Check a runtime value against an expected type.
///
/// The actual type is inferred into a scratch region that is torn down
/// before returning. An inference failure fails the check silently (the
/// directory already reported).
pub fn check_value_where(
    pool: &mut TypePool,
    expected: TypeIdx,
    value: &dyn ValueView,
    directory: &mut dyn FunctionDirectory,
    queue: &mut DiagnosticQueue,
    where_: Where,
) -> CheckResult {
    let mark = pool.mark();
    let actual = infer_value(value, next_copy_id(), pool, directory, true);
    let result = match actual {
        Some(actual) => check_type(pool, expected, actual, queue, true, where_),
        None => Err(TypeMismatch),
    };
    pool.reset(mark);
    result
}

/// Check call-site arguments against a function type.
///
/// A non-callable `func_type` has no contract to enforce and passes.
#[tracing::instrument(level = "trace", skip_all, fields(name = %name, argc = args.len()))]
pub fn check_args(
    pool: &mut TypePool,
    func_type: TypeIdx,
    args: &[&dyn ValueView],
    name: &str,
    directory: &mut dyn FunctionDirectory,
    queue: &mut DiagnosticQueue,
) -> CheckResult {
    if !pool.kind(func_type).is_callable() {
        return Ok(());
    }

    let variadic = i32::from(pool.flags(func_type).is_variadic());
    let declared = pool.arg_count(func_type);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "call sites cannot exceed i32::MAX arguments"
    )]
    let arg_count = args.len() as i32;

    if arg_count < pool.min_arg_count(func_type) - variadic {
        queue.emit(
            Diagnostic::error(ErrorCode::E2002)
                .with_message(format!("not enough arguments for function: {name}")),
        );
        return Err(TypeMismatch);
    }
    if variadic == 0 && declared >= 0 && arg_count > declared {
        queue.emit(
            Diagnostic::error(ErrorCode::E2003)
                .with_message(format!("too many arguments for function: {name}")),
        );
        return Err(TypeMismatch);
    }
    if pool.args(func_type).is_none() {
        return Ok(()); // cannot check
    }

    for (i, value) in args.iter().enumerate() {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_possible_wrap,
            reason = "call sites cannot exceed i32::MAX arguments"
        )]
        let index = i as i32;
        let expected = if variadic == 1 && index >= declared - 1 {
            // Trailing arguments check against the variadic element type.
            pool.args(func_type)
                .and_then(|sig| sig.last().copied())
                .and_then(|last| pool.member(last))
                .unwrap_or(TypeIdx::ANY)
        } else {
            pool.args(func_type)
                .and_then(|sig| sig.get(i).copied())
                .unwrap_or(TypeIdx::ANY)
        };
        check_value(pool, expected, *value, directory, queue, index + 1)?;
    }
    Ok(())
}

/// Check if a value is not a bool but will be stored as one.
///
/// True for the literals 0 and 1 assigned where `bool` is expected; the
/// invocation glue converts the stored value.
pub fn needs_bool_conversion(expected: TypeIdx, value: &dyn ValueView) -> bool {
    expected == TypeIdx::BOOL
        && value.kind() == TypeKind::Number
        && matches!(value.as_number(), Some(0 | 1))
}
