//! Java modifiers.

/// Declaration modifiers, in the order Java style writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Transient,
    Volatile,
}

impl Modifier {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Abstract => "abstract",
            Self::Static => "static",
            Self::Final => "final",
            Self::Transient => "transient",
            Self::Volatile => "volatile",
        }
    }
}

/// `"public static "` for a set of modifiers; empty for none.
pub(crate) fn prefix<'a>(modifiers: impl IntoIterator<Item = &'a Modifier>) -> String {
    let mut sorted: Vec<Modifier> = modifiers.into_iter().copied().collect();
    sorted.sort();
    sorted.dedup();
    sorted.iter().map(|m| format!("{} ", m.keyword())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_ordered() {
        assert_eq!(
            prefix(&[Modifier::Final, Modifier::Static, Modifier::Public]),
            "public static final "
        );
        assert_eq!(prefix(&[]), "");
    }
}
