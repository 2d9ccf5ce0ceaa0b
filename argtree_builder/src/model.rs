use crate::constant::*;

/// The key by which an option is written on the command line.
///
/// A `char` converts into a [`OptionKey::Short`] key, any string into a [`OptionKey::Long`] key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionKey {
    /// `-k`: a single character key.
    Short(char),
    /// `--key`: a long key.
    Long(String),
}

impl From<char> for OptionKey {
    fn from(value: char) -> Self {
        OptionKey::Short(value)
    }
}

impl From<&str> for OptionKey {
    fn from(value: &str) -> Self {
        OptionKey::Long(value.to_string())
    }
}

impl From<String> for OptionKey {
    fn from(value: String) -> Self {
        OptionKey::Long(value)
    }
}

impl From<&String> for OptionKey {
    fn from(value: &String) -> Self {
        OptionKey::Long(value.clone())
    }
}

impl std::fmt::Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionKey::Short(key) => write!(f, "{SHORT_PREFIX}{key}"),
            OptionKey::Long(key) => write!(f, "{LONG_PREFIX}{key}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OptionKey::from('b'), "-b")]
    #[case(OptionKey::from("bar"), "--bar")]
    #[case(OptionKey::from("bar".to_string()), "--bar")]
    #[case(OptionKey::from(&"dry-run".to_string()), "--dry-run")]
    fn display(#[case] key: OptionKey, #[case] expected: &str) {
        assert_eq!(key.to_string(), expected);
    }

    #[test]
    fn char_is_short() {
        assert_eq!(OptionKey::from('x'), OptionKey::Short('x'));
        assert_ne!(OptionKey::from('x'), OptionKey::from("x"));
    }
}
