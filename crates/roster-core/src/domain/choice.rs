//! Fixed-choice dropdown values. Every choice has a display label used in
//! exports and emails; parsing is lenient about case, accents and punctuation.

macro_rules! choice_type {
    (
        $(#[$meta:meta])*
        $name:ident, $error:ident {
            $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let key = $crate::text::choice_key(raw);
                if !key.is_empty() {
                    $(
                        if key == $crate::text::choice_key($label)
                            $(|| key == $crate::text::choice_key($alias))*
                        {
                            return Ok($name::$variant);
                        }
                    )+
                }
                Err($crate::error::CoreError::$error(raw.trim().to_string()))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use choice_type;
