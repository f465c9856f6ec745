use alloc::boxed::Box;
use core::any::{Any, TypeId, type_name};
use core::marker::PhantomData;

use super::callable::{FuncThunk, IntoCtor, IntoFunc, IntoMethod, IntoMethodMut};
use super::data_access::{DataAccess, Erased};
use crate::any::{ArgTypes, eq_impl};
use crate::name::{NameKey, new_name};
use crate::prop::PropList;
use crate::registry::{CtorNode, DataNode, DtorNode, FuncNode, MetaRegistry, TypeNode};
use crate::{AnyValue, RegisterError};

// -----------------------------------------------------------------------------
// MetaFactory

/// The record that [`MetaFactory::prop`] attaches to.
#[derive(Clone, Copy)]
enum Target {
    Type,
    Ctor(usize),
    Dtor,
    Data(usize),
    Func(usize),
}

/// Builder returned by [`MetaRegistry::reflect`].
///
/// Each step registers one record and returns the builder. A following
/// [`prop`](Self::prop) annotates the record registered by the previous step,
/// or the type itself right after `reflect`.
///
/// # Panics
///
/// Every step panics with a [`RegisterError`] on a duplicate registration.
///
/// # Examples
///
/// ```
/// use vc_meta::{MetaRegistry, field};
///
/// #[derive(Default)]
/// struct Counter {
///     value: u32,
/// }
///
/// let mut registry = MetaRegistry::new();
/// registry
///     .reflect::<Counter>("counter")
///     .prop("category", "demo")
///     .ctor_default()
///     .data("value", field(|c: &Counter| &c.value, |c: &mut Counter| &mut c.value))
///     .method_mut("bump", |c: &mut Counter, by: u32| c.value += by)
///     .prop("undoable", false);
///
/// let ty = registry.resolve_by_name("counter").unwrap();
/// let mut counter = ty.construct(());
///
/// let bump = ty.func("bump").unwrap();
/// assert!(bump.invoke_mut(&mut counter, (5_u32,)).is::<()>());
/// assert_eq!(*ty.data("value").unwrap().get(&counter).read::<u32>(), 5);
/// ```
pub struct MetaFactory<'r, T> {
    registry: &'r mut MetaRegistry,
    index: usize,
    target: Target,
    marker: PhantomData<fn() -> T>,
}

impl<'r, T: Any + Send + Sync> MetaFactory<'r, T> {
    #[inline]
    pub(crate) fn new(registry: &'r mut MetaRegistry, index: usize) -> Self {
        Self {
            registry,
            index,
            target: Target::Type,
            marker: PhantomData,
        }
    }

    #[inline]
    fn node(&mut self) -> &mut TypeNode {
        self.registry.node_mut(self.index)
    }

    /// Attaches a property to the most recently registered record.
    ///
    /// Keys must be unique within one record, compared by type and value.
    #[track_caller]
    pub fn prop<K, V>(mut self, key: K, value: V) -> Self
    where
        K: PartialEq + Any + Send + Sync,
        V: Any + Send + Sync,
    {
        let target = self.target;
        let node = self.node();
        let props: &mut PropList = match target {
            Target::Type => &mut node.props,
            Target::Ctor(i) => &mut node.ctors[i].props,
            Target::Dtor => match &mut node.dtor {
                Some(dtor) => &mut dtor.props,
                None => &mut node.props,
            },
            Target::Data(i) => &mut node.data[i].props,
            Target::Func(i) => &mut node.funcs[i].props,
        };

        if !props.insert(AnyValue::comparable(key), AnyValue::new(value)) {
            RegisterError::DuplicateProperty {
                owner: type_name::<T>(),
                key: type_name::<K>(),
            }
            .handle_error();
        }
        self
    }

    /// Makes values of `T` handed out by the registry comparable.
    ///
    /// Constructed instances, data reads and function results of type `T`
    /// then compare with [`PartialEq`] instead of never being equal.
    pub fn comparable(mut self) -> Self
    where
        T: PartialEq,
    {
        self.node().eq = Some(eq_impl::<T>);
        self.target = Target::Type;
        self
    }

    /// Registers a constructor from a callable returning `T`.
    ///
    /// [`MetaType::construct`](crate::MetaType::construct) matches newest
    /// first, so a later constructor with the same parameters shadows an
    /// earlier one there.
    pub fn ctor<M, F: IntoCtor<T, M>>(mut self, f: F) -> Self {
        let args = F::Args::register(self.registry);
        let arg_ids = arg_ids::<F::Args>();
        let invoke = f.into_thunk().0;
        let ty = self.index;

        let node = self.node();
        if node.ctors.iter().any(|ctor| ctor.arg_ids == arg_ids) {
            log::warn!(
                "`{}` registers a second constructor with the same parameters, `construct` picks the newest one",
                type_name::<T>(),
            );
        }
        node.ctors.push(CtorNode {
            ty,
            args,
            arg_ids,
            invoke,
            props: PropList::new(),
        });
        log::trace!("`{}`: constructor #{}", type_name::<T>(), node.ctors.len());

        self.target = Target::Ctor(node.ctors.len() - 1);
        self
    }

    /// Registers [`Default::default`] as a zero-argument constructor.
    #[inline]
    pub fn ctor_default(self) -> Self
    where
        T: Default,
    {
        self.ctor(T::default)
    }

    /// Registers [`From::from`] as a single-argument constructor.
    #[inline]
    pub fn ctor_from<A: Any + Send + Sync>(self) -> Self
    where
        T: From<A>,
    {
        self.ctor(<T as From<A>>::from)
    }

    /// Registers the destructor, which consumes the instance.
    #[track_caller]
    pub fn dtor<F: Fn(T) + Send + Sync + 'static>(mut self, f: F) -> Self {
        let node = self.node();
        if node.dtor.is_some() {
            RegisterError::DuplicateDtor {
                owner: type_name::<T>(),
            }
            .handle_error();
        }
        node.dtor = Some(DtorNode {
            invoke: Box::new(move |instance: AnyValue| instance.take::<T>().map(&f)),
            props: PropList::new(),
        });
        log::trace!("`{}`: destructor", type_name::<T>());

        self.target = Target::Dtor;
        self
    }

    /// Registers a data member or shared variable.
    ///
    /// Whether it is readonly or shared is decided by `access`.
    #[track_caller]
    pub fn data<A: DataAccess<T>>(mut self, name: &str, access: A) -> Self {
        let ty = self.registry.slot::<A::Value>();
        let key = NameKey::new(name);

        let node = self.node();
        if node.data.iter().any(|data| key.matches(&data.name)) {
            RegisterError::DuplicateData {
                owner: type_name::<T>(),
                name: name.into(),
            }
            .handle_error();
        }
        node.data.push(DataNode {
            name: new_name(name),
            readonly: A::READONLY,
            shared: A::SHARED,
            ty,
            ty_id: TypeId::of::<A::Value>(),
            access: Box::new(Erased::<T, A>::new(access)),
            props: PropList::new(),
        });
        log::trace!("`{}`: data \"{name}\"", type_name::<T>());

        self.target = Target::Data(node.data.len() - 1);
        self
    }

    /// Registers a shared function, one that takes no instance.
    #[track_caller]
    pub fn func<M, F: IntoFunc<M>>(self, name: &str, f: F) -> Self {
        let thunk = f.into_thunk();
        self.push_func::<F::Args, F::Output>(name, false, true, thunk)
    }

    /// Registers a constant function taking `&T` first.
    ///
    /// Any callable with that shape works, so free functions can extend a
    /// type they do not own.
    #[track_caller]
    pub fn method<M, F: IntoMethod<T, M>>(self, name: &str, f: F) -> Self {
        let thunk = f.into_thunk();
        self.push_func::<F::Args, F::Output>(name, true, false, thunk)
    }

    /// Registers a function taking `&mut T` first.
    #[track_caller]
    pub fn method_mut<M, F: IntoMethodMut<T, M>>(self, name: &str, f: F) -> Self {
        let thunk = f.into_thunk();
        self.push_func::<F::Args, F::Output>(name, false, false, thunk)
    }

    #[track_caller]
    fn push_func<A: ArgTypes, R: Any>(
        mut self,
        name: &str,
        constant: bool,
        shared: bool,
        thunk: FuncThunk,
    ) -> Self {
        let args = A::register(self.registry);
        let ret = self.registry.slot::<R>();
        let key = NameKey::new(name);

        let node = self.node();
        if node.funcs.iter().any(|func| key.matches(&func.name)) {
            RegisterError::DuplicateFunc {
                owner: type_name::<T>(),
                name: name.into(),
            }
            .handle_error();
        }
        node.funcs.push(FuncNode {
            name: new_name(name),
            constant,
            shared,
            ret,
            ret_id: TypeId::of::<R>(),
            args,
            arg_ids: arg_ids::<A>(),
            invoke: thunk.0,
            props: PropList::new(),
        });
        log::trace!("`{}`: function \"{name}\"", type_name::<T>());

        self.target = Target::Func(node.funcs.len() - 1);
        self
    }
}

fn arg_ids<A: ArgTypes>() -> Box<[TypeId]> {
    (0..A::ARITY).filter_map(A::type_id_at).collect()
}
