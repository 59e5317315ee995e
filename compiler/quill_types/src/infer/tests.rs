use pretty_assertions::assert_eq;

use super::*;
use crate::test_support::{TestDirectory, TestUserFunc, TestValue};
use crate::{DurableType, EmptyDirectory, TypeFlags};

fn infer(pool: &mut TypePool, value: &TestValue) -> Option<TypeIdx> {
    infer_value(value, next_copy_id(), pool, &mut EmptyDirectory, true)
}

#[test]
fn scalars_infer_to_canonicals() {
    let mut pool = TypePool::new();

    assert_eq!(infer(&mut pool, &TestValue::Number(5)), Some(TypeIdx::NUMBER));
    assert_eq!(infer(&mut pool, &TestValue::Bool), Some(TypeIdx::BOOL));
    assert_eq!(infer(&mut pool, &TestValue::Str), Some(TypeIdx::STRING));
    assert_eq!(infer(&mut pool, &TestValue::Float), Some(TypeIdx::FLOAT));
    assert_eq!(infer(&mut pool, &TestValue::Blob), Some(TypeIdx::BLOB));
    assert_eq!(infer(&mut pool, &TestValue::Special), Some(TypeIdx::SPECIAL));
    assert_eq!(pool.len(), TypeIdx::FIRST_DYNAMIC as usize);
}

#[test]
fn zero_and_one_promote_to_number_bool() {
    let mut pool = TypePool::new();

    assert_eq!(infer(&mut pool, &TestValue::Number(0)), Some(TypeIdx::NUMBER_BOOL));
    assert_eq!(infer(&mut pool, &TestValue::Number(1)), Some(TypeIdx::NUMBER_BOOL));
    assert_eq!(infer(&mut pool, &TestValue::Number(2)), Some(TypeIdx::NUMBER));
    assert_eq!(infer(&mut pool, &TestValue::Number(-1)), Some(TypeIdx::NUMBER));
}

#[test]
fn empty_and_null_lists_infer_empty() {
    let mut pool = TypePool::new();

    assert_eq!(infer(&mut pool, &TestValue::list(vec![])), Some(TypeIdx::LIST_EMPTY));
    assert_eq!(infer(&mut pool, &TestValue::NullList), Some(TypeIdx::LIST_EMPTY));
}

#[test]
fn homogeneous_list_infers_member() {
    let mut pool = TypePool::new();

    let value = TestValue::list(vec![
        TestValue::Number(4),
        TestValue::Number(5),
        TestValue::Number(6),
    ]);
    assert_eq!(infer(&mut pool, &value), Some(TypeIdx::LIST_NUMBER));
}

#[test]
fn heterogeneous_list_widens_to_any() {
    let mut pool = TypePool::new();

    // [1, 2, "x"]
    let value = TestValue::list(vec![
        TestValue::Number(1),
        TestValue::Number(2),
        TestValue::Str,
    ]);
    assert_eq!(infer(&mut pool, &value), Some(TypeIdx::LIST_ANY));
}

#[test]
fn shallow_inference_short_circuits() {
    let mut pool = TypePool::new();

    let value = TestValue::list(vec![TestValue::Number(1), TestValue::Number(2)]);
    let inferred = infer_value(&value, next_copy_id(), &mut pool, &mut EmptyDirectory, false);
    assert_eq!(inferred, Some(TypeIdx::LIST_ANY));
}

#[test]
fn range_list_fast_path() {
    let mut pool = TypePool::new();
    assert_eq!(infer(&mut pool, &TestValue::range_list()), Some(TypeIdx::LIST_NUMBER));
}

#[test]
fn nested_lists_infer_recursively() {
    let mut pool = TypePool::new();

    let value = TestValue::list(vec![
        TestValue::list(vec![TestValue::Str]),
        TestValue::list(vec![TestValue::Str]),
    ]);
    let inferred = infer(&mut pool, &value).unwrap();
    assert_eq!(pool.kind(inferred), TypeKind::List);
    assert_eq!(pool.member(inferred), Some(TypeIdx::LIST_STRING));
}

#[test]
fn cyclic_list_terminates_as_list_any() {
    let mut pool = TypePool::new();
    assert_eq!(infer(&mut pool, &TestValue::cyclic_list()), Some(TypeIdx::LIST_ANY));
}

#[test]
fn cyclic_dict_terminates_as_dict_any() {
    let mut pool = TypePool::new();
    assert_eq!(infer(&mut pool, &TestValue::cyclic_dict()), Some(TypeIdx::DICT_ANY));
}

#[test]
fn stale_stamps_do_not_leak_between_passes() {
    let mut pool = TypePool::new();

    let value = TestValue::list(vec![TestValue::Number(7)]);
    assert_eq!(infer(&mut pool, &value), Some(TypeIdx::LIST_NUMBER));
    // A second pass stamps with a fresh id and must walk the list again.
    assert_eq!(infer(&mut pool, &value), Some(TypeIdx::LIST_NUMBER));
}

#[test]
fn dict_values_infer_member() {
    let mut pool = TypePool::new();

    let value = TestValue::dict(vec![TestValue::Number(2), TestValue::Number(3)]);
    assert_eq!(infer(&mut pool, &value), Some(TypeIdx::DICT_NUMBER));

    assert_eq!(infer(&mut pool, &TestValue::dict(vec![])), Some(TypeIdx::DICT_EMPTY));
}

#[test]
fn internal_func_uses_directory_return_type() {
    let mut pool = TypePool::new();
    let mut directory = TestDirectory::with_internal("len", TypeIdx::NUMBER);

    let inferred =
        infer_value(&TestValue::Func("len"), next_copy_id(), &mut pool, &mut directory, true)
            .unwrap();

    assert_eq!(pool.kind(inferred), TypeKind::Func);
    assert_eq!(pool.member(inferred), Some(TypeIdx::NUMBER));
    assert_eq!(pool.arg_count(inferred), -1);
    assert_eq!(pool.args(inferred), None);
}

#[test]
fn user_func_returns_cached_signature() {
    let mut pool = TypePool::new();

    // func(number): bool, cached as a durable signature.
    let template = pool.alloc_func(TypeIdx::BOOL, 1);
    pool.set_func_args(template, &[TypeIdx::NUMBER]);
    let signature = DurableType::from_pool(&pool, template);
    pool.clear();

    let mut directory = TestDirectory::with_user(TestUserFunc {
        name: "callback",
        compile_fails: false,
        signature: Some(signature),
    });

    let inferred = infer_value(
        &TestValue::Func("callback"),
        next_copy_id(),
        &mut pool,
        &mut directory,
        true,
    )
    .unwrap();

    assert_eq!(pool.kind(inferred), TypeKind::Func);
    assert_eq!(pool.member(inferred), Some(TypeIdx::BOOL));
    assert_eq!(pool.arg_count(inferred), 1);
    assert_eq!(pool.args(inferred), Some(&[TypeIdx::NUMBER][..]));
}

#[test]
fn failed_compilation_fails_inference() {
    let mut pool = TypePool::new();
    let mut directory = TestDirectory::with_user(TestUserFunc {
        name: "broken",
        compile_fails: true,
        signature: None,
    });

    let inferred = infer_value(
        &TestValue::Func("broken"),
        next_copy_id(),
        &mut pool,
        &mut directory,
        true,
    );
    assert_eq!(inferred, None);
}

#[test]
fn unresolved_func_falls_back() {
    let mut pool = TypePool::new();

    let inferred = infer(&mut pool, &TestValue::Func("nowhere")).unwrap();
    assert_eq!(pool.kind(inferred), TypeKind::Func);
    assert_eq!(pool.member(inferred), Some(TypeIdx::ANY));
    assert_eq!(pool.arg_count(inferred), 0);
}

#[test]
fn partial_keeps_its_kind() {
    let mut pool = TypePool::new();

    let value = TestValue::Partial {
        name: None,
        func: None,
    };
    let inferred = infer(&mut pool, &value).unwrap();
    assert_eq!(pool.kind(inferred), TypeKind::Partial);
    assert!(!pool.flags(inferred).contains(TypeFlags::STATIC));
}

#[test]
fn host_var_shapes_short_circuit() {
    let mut pool = TypePool::new();

    let list = TestValue::list(vec![TestValue::Number(1)]);
    assert_eq!(
        infer_host_var(&list, &mut pool, &mut EmptyDirectory),
        Some(TypeIdx::LIST_STRING)
    );

    let dict = TestValue::dict(vec![TestValue::Number(1)]);
    assert_eq!(
        infer_host_var(&dict, &mut pool, &mut EmptyDirectory),
        Some(TypeIdx::DICT_ANY)
    );

    assert_eq!(
        infer_host_var(&TestValue::Number(7), &mut pool, &mut EmptyDirectory),
        Some(TypeIdx::NUMBER)
    );
}

#[test]
fn value_type_name_formats_and_cleans_up() {
    let mut pool = TypePool::new();

    let value = TestValue::list(vec![TestValue::Number(2), TestValue::Number(3)]);
    let name = value_type_name(&value, &mut pool, &mut EmptyDirectory);
    assert_eq!(name, "list<number>");
    assert_eq!(pool.len(), TypeIdx::FIRST_DYNAMIC as usize);

    let nested = TestValue::list(vec![TestValue::list(vec![TestValue::Float])]);
    let name = value_type_name(&nested, &mut pool, &mut EmptyDirectory);
    assert_eq!(name, "list<list<float>>");
    assert_eq!(pool.len(), TypeIdx::FIRST_DYNAMIC as usize);
}

#[test]
fn copy_ids_are_distinct_per_pass() {
    let a = next_copy_id();
    let b = next_copy_id();
    let c = next_copy_id();
    assert_ne!(a, b);
    assert_ne!(b, c);
}
