use core::any::TypeId;

use vc_os::sync::RwLock;

use vc_meta::{AnyValue, MetaRegistry, MetaType, field, field_ref, global_mut, global_ref};

#[derive(Clone, Copy, PartialEq, Debug)]
enum Props {
    Bool,
    Int,
}

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Clone, PartialEq, Debug)]
struct Glyph(char);

impl From<char> for Glyph {
    fn from(value: char) -> Self {
        Glyph(value)
    }
}

static DESTROYED: RwLock<char> = RwLock::new('\0');

fn glyph_registry() -> MetaRegistry {
    let mut registry = MetaRegistry::new();
    registry
        .reflect::<Glyph>("glyph")
        .prop(Props::Bool, false)
        .prop(Props::Int, 3)
        .ctor(|| Glyph('a'))
        .prop(Props::Bool, true)
        .ctor_from::<char>()
        .dtor(|glyph: Glyph| *DESTROYED.write().unwrap() = glyph.0)
        .prop(Props::Bool, false)
        .data("value", field_ref(|g: &Glyph| &g.0))
        .method("identity", |g: &Glyph| g.0)
        .method_mut("shift", |g: &mut Glyph, by: u32| {
            g.0 = char::from_u32(g.0 as u32 + by).unwrap_or(g.0);
        });
    registry
}

#[derive(Default)]
struct Settings {
    volume: u8,
    muted: bool,
}

static VERSION: u32 = 7;
static INSTANCES: RwLock<u32> = RwLock::new(0);

fn settings_registry() -> MetaRegistry {
    let mut registry = MetaRegistry::new();
    registry
        .reflect::<Settings>("settings")
        .ctor_default()
        .data("volume", field(|s: &Settings| &s.volume, |s: &mut Settings| &mut s.volume))
        .data("muted", field(|s: &Settings| &s.muted, |s: &mut Settings| &mut s.muted))
        .data("version", global_ref(&VERSION))
        .data("instances", global_mut(&INSTANCES))
        .func("create", || {
            *INSTANCES.write().unwrap() += 1;
            Settings::default()
        })
        .method("loud", |s: &Settings, threshold: u8| !s.muted && s.volume > threshold)
        .method_mut("toggle", |s: &mut Settings| {
            s.muted = !s.muted;
            s.muted
        });
    registry.reflect::<u8>("u8");
    registry.reflect::<bool>("bool");
    registry
}

fn names<'r>(iter: impl Iterator<Item = &'r str>) -> Vec<&'r str> {
    iter.collect()
}

// -----------------------------------------------------------------------------
// Tests

#[test]
fn resolve() {
    let registry = glyph_registry();

    let ty = registry.resolve::<Glyph>().unwrap();
    assert_eq!(ty.name(), "glyph");
    assert!(ty.is::<Glyph>());
    assert_eq!(Some(ty), registry.resolve_by_name("glyph"));
    assert!(registry.resolve_by_name("Glyph").is_none());

    // `char` is only referenced, never reflected.
    assert!(registry.resolve::<char>().is_none());
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.type_of(&AnyValue::new(Glyph('x'))), Some(ty));
    assert!(registry.type_of(&AnyValue::invalid()).is_none());
}

#[test]
fn type_properties() {
    let registry = glyph_registry();
    let ty = registry.resolve::<Glyph>().unwrap();

    let bool_prop = ty.property(&Props::Bool).unwrap();
    assert_eq!(*bool_prop.key().read::<Props>(), Props::Bool);
    assert!(!*bool_prop.value().read::<bool>());
    assert_eq!(*ty.property(&Props::Int).unwrap().value().read::<i32>(), 3);

    let keys: Vec<Props> = ty.properties().map(|p| *p.key().read::<Props>()).collect();
    assert_eq!(keys, [Props::Int, Props::Bool]);
}

#[test]
fn ctors() {
    let registry = glyph_registry();
    let ty = registry.resolve::<Glyph>().unwrap();

    assert_eq!(ty.ctors().count(), 2);
    assert!(ty.ctor::<(i32,)>().is_none());

    let nullary = ty.ctor::<()>().unwrap();
    assert_eq!(nullary.arity(), 0);
    assert!(*nullary.property(&Props::Bool).unwrap().value().read::<bool>());
    assert_eq!(*nullary.invoke(()).read::<Glyph>(), Glyph('a'));

    let unary = ty.ctor::<(char,)>().unwrap();
    assert_eq!(unary.arity(), 1);
    assert_eq!(unary.arg_type_id(0), Some(TypeId::of::<char>()));
    assert!(unary.arg(0).is_none());
    assert!(unary.properties().next().is_none());
    assert!(!unary.invoke((42_i32,)).is_valid());
    assert!(!unary.invoke(()).is_valid());

    assert!(!ty.construct((42_i32,)).is_valid());
    let glyph = ty.construct(('c',));
    assert!(glyph.is_valid());
    assert_eq!(glyph.read::<Glyph>().0, 'c');
}

#[test]
fn dtor() {
    let registry = glyph_registry();
    let ty = registry.resolve::<Glyph>().unwrap();

    let dtor = ty.dtor().unwrap();
    assert!(!*dtor.property(&Props::Bool).unwrap().value().read::<bool>());

    let glyph = ty.construct(('z',));
    assert!(ty.destroy(glyph).is_ok());
    assert_eq!(*DESTROYED.read().unwrap(), 'z');

    let rejected = dtor.invoke(AnyValue::new('q')).unwrap_err();
    assert_eq!(*rejected.read::<char>(), 'q');
    assert_eq!(*DESTROYED.read().unwrap(), 'z');
}

#[test]
fn readonly_data() {
    let registry = glyph_registry();
    let ty = registry.resolve::<Glyph>().unwrap();
    let mut glyph = Glyph('c');

    let value = ty.data("value").unwrap();
    assert_eq!(value.name(), "value");
    assert!(value.is_readonly());
    assert!(!value.is_shared());
    assert!(value.ty().is_none());
    assert_eq!(*value.get(&glyph).read::<char>(), 'c');

    assert!(!value.set(&mut glyph, 'd'));
    assert_eq!(glyph.0, 'c');
    assert!(ty.data("missing").is_none());
}

#[test]
fn funcs() {
    let registry = glyph_registry();
    let ty = registry.resolve::<Glyph>().unwrap();
    let mut glyph = ty.construct(('a',));

    assert_eq!(names(ty.funcs().map(|f| f.name())), ["shift", "identity"]);

    let identity = ty.func("identity").unwrap();
    assert!(identity.is_const());
    assert!(!identity.is_shared());
    assert_eq!(identity.arity(), 0);
    assert_eq!(*identity.invoke(&glyph, ()).read::<char>(), 'a');
    assert!(!identity.invoke(&Glyph('b'), ('x',)).is_valid());
    assert!(!identity.invoke(&'b', ()).is_valid());

    let shift = ty.func("shift").unwrap();
    assert!(!shift.is_const());
    assert!(shift.accept::<(u32,)>());
    assert!(!shift.accept::<(i32,)>());
    assert!(shift.invoke_mut(&mut glyph, (2_u32,)).is::<()>());
    assert_eq!(*identity.invoke(&glyph, ()).read::<char>(), 'c');
}

#[test]
fn data_flags() {
    let registry = settings_registry();
    let ty = registry.resolve::<Settings>().unwrap();

    let flags = |name: &str| {
        let data = ty.data(name).unwrap();
        (data.is_readonly(), data.is_shared())
    };
    assert_eq!(flags("volume"), (false, false));
    assert_eq!(flags("version"), (true, true));
    assert_eq!(flags("instances"), (false, true));

    assert_eq!(
        names(ty.data_members().map(|d| d.name())),
        ["instances", "version", "muted", "volume"],
    );

    let u8_ty = registry.resolve::<u8>();
    assert!(u8_ty.is_some());
    assert_eq!(ty.data("volume").unwrap().ty(), u8_ty);
    assert!(ty.data("version").unwrap().ty().is_none());
}

#[test]
fn member_data() {
    let registry = settings_registry();
    let ty = registry.resolve::<Settings>().unwrap();
    let mut settings = ty.construct(());

    let volume = ty.data("volume").unwrap();
    assert!(volume.accept::<u8>());
    assert!(!volume.accept::<u16>());
    assert!(!volume.set(&mut settings, 10_u16));
    assert!(volume.set(&mut settings, 10_u8));
    assert_eq!(*volume.get(&settings).read::<u8>(), 10);
    assert_eq!(settings.read::<Settings>().volume, 10);

    assert!(!volume.set_shared(3_u8));
    assert!(!volume.get_shared().is_valid());

    let version = ty.data("version").unwrap();
    assert_eq!(*version.get_shared().read::<u32>(), 7);
    assert_eq!(*version.get(&settings).read::<u32>(), 7);
    assert!(!version.set_shared(8_u32));
}

#[test]
fn shared_funcs_and_data() {
    let registry = settings_registry();
    let ty = registry.resolve::<Settings>().unwrap();

    let create = ty.func("create").unwrap();
    assert!(create.is_shared());
    assert!(!create.is_const());
    assert_eq!(create.ret(), Some(ty));

    let instances = ty.data("instances").unwrap();
    let before = *instances.get_shared().read::<u32>();
    let settings = create.call(());
    assert!(settings.is::<Settings>());
    assert_eq!(*instances.get_shared().read::<u32>(), before + 1);

    assert!(instances.set_shared(100_u32));
    assert_eq!(*INSTANCES.read().unwrap(), 100);
}

#[test]
fn methods() {
    let registry = settings_registry();
    let ty = registry.resolve::<Settings>().unwrap();
    let mut settings = Settings {
        volume: 50,
        muted: false,
    };

    let loud = ty.func("loud").unwrap();
    assert_eq!(loud.ret(), registry.resolve::<bool>());
    assert_eq!(loud.arg(0), registry.resolve::<u8>());
    assert!(*loud.invoke(&settings, (40_u8,)).read::<bool>());
    assert!(!loud.invoke(&settings, (40_i32,)).is_valid());
    assert!(!loud.call((40_u8,)).is_valid());

    let toggle = ty.func("toggle").unwrap();
    assert!(!toggle.invoke(&settings, ()).is_valid());
    assert!(!settings.muted);
    assert!(*toggle.invoke_mut(&mut settings, ()).read::<bool>());
    assert!(settings.muted);
    assert!(!*loud.invoke(&settings, (40_u8,)).read::<bool>());
}

#[test]
fn erased_arguments() {
    let registry = settings_registry();
    let ty = registry.resolve::<Settings>().unwrap();
    let settings = Settings {
        volume: 5,
        muted: false,
    };

    let loud = ty.func("loud").unwrap();
    let args = [AnyValue::new(1_u8)];
    assert!(loud.accepts(&args));
    assert!(*loud.invoke(&settings, args).read::<bool>());
    assert!(!loud.invoke(&settings, Vec::<AnyValue>::new()).is_valid());
    assert!(!loud.invoke(&settings, [AnyValue::invalid()]).is_valid());
}

#[test]
fn global_registry() {
    struct Token(String);

    {
        let mut registry = vc_meta::global().write();
        registry
            .reflect::<Token>("tests::token")
            .ctor(|text: String| Token(text))
            .method("text", |t: &Token| t.0.clone());
    }

    let registry = vc_meta::global().read();
    let ty: MetaType<'_> = registry.resolve_by_name("tests::token").unwrap();
    let token = ty.construct((String::from("abc"),));
    let text = ty.func("text").unwrap().invoke(&token, ());
    assert_eq!(text.read::<String>(), "abc");
    assert!(registry.types().any(|t| t == ty));
}

#[derive(PartialEq, Debug)]
struct Tint(u8);

#[test]
fn comparable_values() {
    let mut registry = MetaRegistry::new();
    registry
        .reflect::<Glyph>("glyph")
        .comparable()
        .ctor_from::<char>()
        .data("value", field_ref(|g: &Glyph| &g.0))
        .method("copy", |g: &Glyph| g.clone())
        .method("tint", |g: &Glyph| Tint(g.0 as u8));
    registry.reflect::<char>("char").comparable();
    registry.reflect::<Tint>("tint").ctor(|v: u8| Tint(v));

    let glyph = registry.resolve::<Glyph>().unwrap();
    let a = glyph.construct(('c',));
    let b = glyph.construct(('c',));
    assert!(a.is_comparable());
    assert_eq!(a, b);
    assert_ne!(a, glyph.construct(('d',)));
    assert_eq!(glyph.ctor::<(char,)>().unwrap().invoke(('c',)), a);

    let value = glyph.data("value").unwrap();
    assert_eq!(value.get(&a), value.get(&b));
    assert_eq!(value.get(&a), AnyValue::new('c'));
    assert_eq!(glyph.func("copy").unwrap().invoke(&a, ()), b);

    // `Tint` implements `PartialEq` but was not registered as comparable.
    let tint = registry.resolve::<Tint>().unwrap();
    let x = tint.construct((1_u8,));
    assert!(x.is_valid() && !x.is_comparable());
    assert_ne!(x, tint.construct((1_u8,)));

    let to_tint = glyph.func("tint").unwrap();
    assert_ne!(to_tint.invoke(&a, ()), to_tint.invoke(&b, ()));
}
