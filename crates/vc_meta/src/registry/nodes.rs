use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};

use crate::AnyValue;
use crate::any::{EqFn, unerase_mut, unerase_ref};
use crate::name::Name;
use crate::prop::PropList;

// -----------------------------------------------------------------------------
// Thunks

pub(crate) type DestroyFn = fn(AnyValue) -> Result<(), AnyValue>;
pub(crate) type CtorFn = Box<dyn Fn(&mut [AnyValue]) -> AnyValue + Send + Sync>;
pub(crate) type DtorFn = Box<dyn Fn(AnyValue) -> Result<(), AnyValue> + Send + Sync>;
pub(crate) type FuncFn = Box<dyn Fn(Receiver<'_>, &mut [AnyValue]) -> AnyValue + Send + Sync>;

fn destroy_impl<T: Any>(value: AnyValue) -> Result<(), AnyValue> {
    value.take::<T>().map(drop)
}

/// The instance a function is invoked on.
pub(crate) enum Receiver<'a> {
    Absent,
    Ref(&'a dyn Any),
    Mut(&'a mut dyn Any),
}

impl<'a> Receiver<'a> {
    pub fn get_ref<T: Any>(self) -> Option<&'a T> {
        match self {
            Receiver::Ref(instance) => unerase_ref(instance),
            Receiver::Mut(instance) => unerase_ref(instance),
            Receiver::Absent => None,
        }
    }

    pub fn get_mut<T: Any>(self) -> Option<&'a mut T> {
        match self {
            Receiver::Mut(instance) => unerase_mut(instance),
            _ => None,
        }
    }
}

/// Type-erased access to a data member.
pub(crate) trait ErasedData: Send + Sync {
    fn get(&self, instance: Option<&dyn Any>) -> AnyValue;

    /// Moves `value` into the member. On failure `value` is left untouched.
    fn set(&self, instance: Option<&mut dyn Any>, value: &mut AnyValue) -> bool;
}

// -----------------------------------------------------------------------------
// Records

pub(crate) struct CtorNode {
    pub ty: usize,
    pub args: Box<[usize]>,
    pub arg_ids: Box<[TypeId]>,
    pub invoke: CtorFn,
    pub props: PropList,
}

pub(crate) struct DtorNode {
    pub invoke: DtorFn,
    pub props: PropList,
}

pub(crate) struct DataNode {
    pub name: Name,
    pub readonly: bool,
    pub shared: bool,
    pub ty: usize,
    pub ty_id: TypeId,
    pub access: Box<dyn ErasedData>,
    pub props: PropList,
}

pub(crate) struct FuncNode {
    pub name: Name,
    pub constant: bool,
    pub shared: bool,
    pub ret: usize,
    pub ret_id: TypeId,
    pub args: Box<[usize]>,
    pub arg_ids: Box<[TypeId]>,
    pub invoke: FuncFn,
    pub props: PropList,
}

/// Everything known about one native type.
///
/// A node without a name is a placeholder: it was referenced by another
/// registration before being reflected itself.
pub(crate) struct TypeNode {
    pub id: TypeId,
    pub type_name: &'static str,
    pub name: Option<Name>,
    pub destroy: DestroyFn,
    pub eq: Option<EqFn>,
    pub ctors: Vec<CtorNode>,
    pub dtor: Option<DtorNode>,
    pub data: Vec<DataNode>,
    pub funcs: Vec<FuncNode>,
    pub props: PropList,
}

impl TypeNode {
    pub fn placeholder<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            name: None,
            destroy: destroy_impl::<T>,
            eq: None,
            ctors: Vec::new(),
            dtor: None,
            data: Vec::new(),
            funcs: Vec::new(),
            props: PropList::new(),
        }
    }

    #[inline]
    pub fn is_reflected(&self) -> bool {
        self.name.is_some()
    }
}
