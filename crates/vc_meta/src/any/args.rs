use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};

use crate::AnyValue;
use crate::registry::MetaRegistry;

// -----------------------------------------------------------------------------
// ArgTypes

/// A statically known parameter list, implemented for tuples of up to twelve
/// elements.
///
/// Used to query constructors and functions by signature, e.g.
/// `ty.ctor::<(char,)>()`.
pub trait ArgTypes: 'static {
    /// Number of parameters.
    const ARITY: usize;

    /// The [`TypeId`] of the parameter at `index`.
    fn type_id_at(index: usize) -> Option<TypeId>;

    /// Resolves every parameter type to its registry slot, creating
    /// placeholders for types that are not reflected yet.
    #[doc(hidden)]
    fn register(registry: &mut MetaRegistry) -> Box<[usize]>;

    /// Returns `true` if `ids` is exactly this parameter list.
    fn matches(ids: &[TypeId]) -> bool {
        ids.len() == Self::ARITY
            && ids
                .iter()
                .enumerate()
                .all(|(index, id)| Self::type_id_at(index) == Some(*id))
    }
}

// -----------------------------------------------------------------------------
// IntoArgs

/// Converts call arguments into type-erased values.
///
/// Tuples wrap each element in its own [`AnyValue`]. Pre-erased arguments can
/// be passed as a `Vec<AnyValue>` or an array.
pub trait IntoArgs {
    fn into_args(self) -> Vec<AnyValue>;
}

impl IntoArgs for Vec<AnyValue> {
    #[inline]
    fn into_args(self) -> Vec<AnyValue> {
        self
    }
}

impl<const N: usize> IntoArgs for [AnyValue; N] {
    #[inline]
    fn into_args(self) -> Vec<AnyValue> {
        Vec::from(self)
    }
}

macro_rules! impl_args {
    ([$($i:tt: $p:ident),*]) => {
        impl<$($p: Any + Send + Sync),*> ArgTypes for ($($p,)*) {
            const ARITY: usize = <[usize]>::len(&[$($i),*]);

            fn type_id_at(index: usize) -> Option<TypeId> {
                <[TypeId]>::get(&[$(TypeId::of::<$p>()),*], index).copied()
            }

            #[allow(unused_variables, reason = "macro implementation.")]
            fn register(registry: &mut MetaRegistry) -> Box<[usize]> {
                alloc::vec![$(registry.slot::<$p>()),*].into_boxed_slice()
            }
        }

        impl<$($p: Any + Send + Sync),*> IntoArgs for ($($p,)*) {
            #[allow(non_snake_case, reason = "macro implementation.")]
            fn into_args(self) -> Vec<AnyValue> {
                let ($($p,)*) = self;
                alloc::vec![$(AnyValue::new($p)),*]
            }
        }
    };
}

vc_utils::range_invoke_12!(impl_args);

// -----------------------------------------------------------------------------
// Helpers

/// Returns `true` if `args` hold exactly the types in `ids`.
pub(crate) fn accepts(ids: &[TypeId], args: &[AnyValue]) -> bool {
    ids.len() == args.len()
        && ids
            .iter()
            .zip(args)
            .all(|(id, arg)| arg.ty_id() == Some(*id))
}

/// Moves the argument at `index` out if it is a `P`.
#[inline]
pub(crate) fn take<P: Any>(args: &mut [AnyValue], index: usize) -> Option<P> {
    args.get_mut(index)?.take_arg()
}

#[cfg(test)]
mod tests {
    use super::{ArgTypes, IntoArgs, accepts};
    use crate::AnyValue;
    use alloc::vec;
    use core::any::TypeId;

    #[test]
    fn tuple_signature() {
        assert_eq!(<() as ArgTypes>::ARITY, 0);
        assert_eq!(<(char, i32) as ArgTypes>::ARITY, 2);
        assert_eq!(<(char, i32)>::type_id_at(1), Some(TypeId::of::<i32>()));
        assert_eq!(<(char, i32)>::type_id_at(2), None);

        assert!(<(char,)>::matches(&[TypeId::of::<char>()]));
        assert!(!<(char,)>::matches(&[TypeId::of::<i32>()]));
        assert!(!<(char,)>::matches(&[]));
        assert!(<()>::matches(&[]));
    }

    #[test]
    fn into_args_keeps_order() {
        let args = ('c', 3_i32).into_args();
        assert!(args[0].is::<char>());
        assert!(args[1].is::<i32>());

        let ids = [TypeId::of::<char>(), TypeId::of::<i32>()];
        assert!(accepts(&ids, &args));
        assert!(!accepts(&ids[..1], &args));
        assert!(!accepts(&ids, &vec![AnyValue::new(3_i32), AnyValue::new('c')]));
    }
}
