//! Value and directory doubles for inference and check tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::{
    CompileFailed, DictView, DurableType, FuncValue, FunctionDirectory, InternalFuncId, ListView,
    TypeIdx, TypeKind, TypePool, UserFuncRef, ValueView,
};

pub(crate) struct TestList {
    pub items: RefCell<Vec<TestValue>>,
    pub range: bool,
    pub visited: Cell<u32>,
}

impl TestList {
    pub fn new(items: Vec<TestValue>) -> Rc<Self> {
        Rc::new(TestList {
            items: RefCell::new(items),
            range: false,
            visited: Cell::new(0),
        })
    }
}

impl ListView for TestList {
    fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn is_range(&self) -> bool {
        self.range
    }

    fn visited_id(&self) -> u32 {
        self.visited.get()
    }

    fn set_visited_id(&self, id: u32) {
        self.visited.set(id);
    }

    fn visit_items(&self, visit: &mut dyn FnMut(&dyn ValueView) -> bool) {
        for item in self.items.borrow().iter() {
            if !visit(item) {
                break;
            }
        }
    }
}

pub(crate) struct TestDict {
    pub values: RefCell<Vec<TestValue>>,
    pub visited: Cell<u32>,
}

impl TestDict {
    pub fn new(values: Vec<TestValue>) -> Rc<Self> {
        Rc::new(TestDict {
            values: RefCell::new(values),
            visited: Cell::new(0),
        })
    }
}

impl DictView for TestDict {
    fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    fn visited_id(&self) -> u32 {
        self.visited.get()
    }

    fn set_visited_id(&self, id: u32) {
        self.visited.set(id);
    }

    fn visit_values(&self, visit: &mut dyn FnMut(&dyn ValueView) -> bool) {
        for value in self.values.borrow().iter() {
            if !visit(value) {
                break;
            }
        }
    }
}

pub(crate) enum TestValue {
    Special,
    Bool,
    Number(i64),
    Float,
    Str,
    Blob,
    List(Rc<TestList>),
    NullList,
    Dict(Rc<TestDict>),
    Func(&'static str),
    Partial {
        name: Option<&'static str>,
        func: Option<UserFuncRef>,
    },
}

impl TestValue {
    pub fn list(items: Vec<TestValue>) -> Self {
        TestValue::List(TestList::new(items))
    }

    pub fn range_list() -> Self {
        TestValue::List(Rc::new(TestList {
            items: RefCell::new(vec![TestValue::Number(1)]),
            range: true,
            visited: Cell::new(0),
        }))
    }

    pub fn dict(values: Vec<TestValue>) -> Self {
        TestValue::Dict(TestDict::new(values))
    }

    /// A list whose single item is the list itself.
    pub fn cyclic_list() -> Self {
        let list = TestList::new(vec![]);
        list.items
            .borrow_mut()
            .push(TestValue::List(Rc::clone(&list)));
        TestValue::List(list)
    }

    /// A dict whose single value is the dict itself.
    pub fn cyclic_dict() -> Self {
        let dict = TestDict::new(vec![]);
        dict.values
            .borrow_mut()
            .push(TestValue::Dict(Rc::clone(&dict)));
        TestValue::Dict(dict)
    }
}

impl ValueView for TestValue {
    fn kind(&self) -> TypeKind {
        match self {
            TestValue::Special => TypeKind::Special,
            TestValue::Bool => TypeKind::Bool,
            TestValue::Number(_) => TypeKind::Number,
            TestValue::Float => TypeKind::Float,
            TestValue::Str => TypeKind::String,
            TestValue::Blob => TypeKind::Blob,
            TestValue::List(_) | TestValue::NullList => TypeKind::List,
            TestValue::Dict(_) => TypeKind::Dict,
            TestValue::Func(_) => TypeKind::Func,
            TestValue::Partial { .. } => TypeKind::Partial,
        }
    }

    fn as_number(&self) -> Option<i64> {
        match self {
            TestValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn as_list(&self) -> Option<&dyn ListView> {
        match self {
            TestValue::List(list) => Some(list.as_ref()),
            _ => None,
        }
    }

    fn as_dict(&self) -> Option<&dyn DictView> {
        match self {
            TestValue::Dict(dict) => Some(dict.as_ref()),
            _ => None,
        }
    }

    fn as_func(&self) -> Option<FuncValue<'_>> {
        match self {
            TestValue::Func(name) => Some(FuncValue::named(name)),
            TestValue::Partial { name, func } => Some(FuncValue {
                name: *name,
                func: *func,
            }),
            _ => None,
        }
    }
}

pub(crate) struct TestUserFunc {
    pub name: &'static str,
    pub compile_fails: bool,
    pub signature: Option<DurableType>,
}

/// Directory double backed by plain vectors; ids are positions.
#[derive(Default)]
pub(crate) struct TestDirectory {
    pub internals: Vec<(&'static str, TypeIdx)>,
    pub users: Vec<TestUserFunc>,
}

impl TestDirectory {
    pub fn with_internal(name: &'static str, ret: TypeIdx) -> Self {
        TestDirectory {
            internals: vec![(name, ret)],
            users: Vec::new(),
        }
    }

    pub fn with_user(func: TestUserFunc) -> Self {
        TestDirectory {
            internals: Vec::new(),
            users: vec![func],
        }
    }
}

impl FunctionDirectory for TestDirectory {
    fn find_internal(&self, name: &str) -> Option<InternalFuncId> {
        self.internals
            .iter()
            .position(|(n, _)| *n == name)
            .map(|i| InternalFuncId::new(u32::try_from(i).unwrap()))
    }

    fn internal_ret_type(&self, id: InternalFuncId, _pool: &mut TypePool) -> TypeIdx {
        self.internals[id.raw() as usize].1
    }

    fn find_user(&self, name: &str) -> Option<UserFuncRef> {
        self.users
            .iter()
            .position(|f| f.name == name)
            .map(|i| UserFuncRef::new(u32::try_from(i).unwrap()))
    }

    fn ensure_compiled(&mut self, func: UserFuncRef) -> Result<(), CompileFailed> {
        if self.users[func.raw() as usize].compile_fails {
            Err(CompileFailed)
        } else {
            Ok(())
        }
    }

    fn synthesize_signature(&mut self, _func: UserFuncRef) {}

    fn cached_signature(&self, func: UserFuncRef) -> Option<&DurableType> {
        self.users[func.raw() as usize].signature.as_ref()
    }
}
