//! Typed wrappers around the raw object names handed out by a video backend.

/// The raw name of a GPU object. Zero is never a valid name.
pub type HandleIndex = u32;

#[macro_export]
macro_rules! impl_handle {
    ($name:ident) => {
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($crate::utils::handle::HandleIndex);

        impl $name {
            #[inline]
            pub fn new(index: $crate::utils::handle::HandleIndex) -> Self {
                $name(index)
            }

            /// Returns the raw name assigned by the backend.
            #[inline]
            pub fn index(self) -> $crate::utils::handle::HandleIndex {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

#[cfg(test)]
mod test {
    impl_handle!(Dummy);

    #[test]
    fn display() {
        assert_eq!(Dummy::new(3).index(), 3);
        assert_eq!(format!("{}", Dummy::new(7)), "Dummy(7)");
    }
}
