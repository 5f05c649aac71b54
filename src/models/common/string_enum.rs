//! 以字符串形式存库的枚举

/// 定义与字符串一一对应的枚举
///
/// 自动生成 serde 序列化（使用给定字符串）、`as_str()`、`Display`、`FromStr`（大小写不敏感）。
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(#[serde(rename = $value)] $variant,)+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($value),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!(
                        "Invalid value '{}', expected one of: {}",
                        s,
                        Self::VALUES.join(", ")
                    )),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::string_enum! {
        enum Color {
            Red => "red",
            DarkBlue => "dark_blue",
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" RED ".parse::<Color>(), Ok(Color::Red));
        assert_eq!("Dark_Blue".parse::<Color>(), Ok(Color::DarkBlue));
    }

    #[test]
    fn test_unknown_value_lists_choices() {
        let err = "green".parse::<Color>().unwrap_err();
        assert!(err.contains("red, dark_blue"));
    }

    #[test]
    fn test_serde_uses_literal() {
        assert_eq!(serde_json::to_string(&Color::DarkBlue).unwrap(), "\"dark_blue\"");
        let parsed: Color = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(parsed, Color::Red);
    }
}
