use alloc::boxed::Box;

use vc_utils::hash::Hashed;

/// An interned record name.
pub(crate) type Name = Hashed<Box<str>>;

#[inline]
pub(crate) fn new_name(text: &str) -> Name {
    Hashed::new(Box::from(text))
}

/// A borrowed name with its hash computed once, for lookups.
#[derive(Clone, Copy)]
pub(crate) struct NameKey<'a> {
    pub hash: u64,
    pub text: &'a str,
}

impl<'a> NameKey<'a> {
    #[inline]
    pub fn new(text: &'a str) -> Self {
        Self {
            hash: Name::hash_one(text),
            text,
        }
    }

    #[inline]
    pub fn matches(&self, name: &Name) -> bool {
        name.hash() == self.hash && &***name == self.text
    }
}

#[cfg(test)]
mod tests {
    use super::{NameKey, new_name};

    #[test]
    fn key_matches_interned() {
        let name = new_name("value");
        assert!(NameKey::new("value").matches(&name));
        assert!(!NameKey::new("values").matches(&name));
    }
}
