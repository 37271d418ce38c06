//! Defines helper macros for generating domain port error enums.
//!
//! Each variant carries a single `message` field and gets a snake-case
//! constructor accepting anything convertible into a `String`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { message: String } => $text:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($text)]
                $variant { message: String },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant {
                            message: message.into(),
                        }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;
