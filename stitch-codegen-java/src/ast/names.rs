//! Import resolution for one Java file.

use std::collections::{BTreeSet, HashMap};

use stitch_ir::{ClassName, TypeName, WildcardBound};

/// Decides how each class is spelled in a file.
///
/// Classes are registered in the order they appear. The first top-level
/// class to claim a simple name gets it; later classes with the same simple
/// name are written fully qualified. Nested classes are written through
/// their top-level class (`Outer.Inner`), which is what gets imported.
#[derive(Debug, Clone)]
pub struct Names {
    package: String,
    by_simple: HashMap<String, ClassName>,
}

impl Names {
    /// Names for a file in `package` declaring the type `own`.
    pub fn new(package: &str, own: &str) -> Self {
        let mut names = Self {
            package: package.to_string(),
            by_simple: HashMap::new(),
        };
        names.register(&ClassName::get(package, own));
        names
    }

    pub fn register(&mut self, name: &ClassName) {
        let top = name.top_level();
        self.by_simple
            .entry(top.simple_name().to_string())
            .or_insert(top);
    }

    pub fn register_type(&mut self, ty: &TypeName) {
        for name in ty.referenced_classes() {
            self.register(name);
        }
    }

    /// How `name` is written in this file.
    pub fn class(&self, name: &ClassName) -> String {
        let top = name.top_level();
        if self.by_simple.get(top.simple_name()) == Some(&top) {
            name.simple_names().join(".")
        } else {
            name.canonical_name()
        }
    }

    pub fn type_name(&self, ty: &TypeName) -> String {
        match ty {
            TypeName::Primitive(p) => p.keyword().to_string(),
            TypeName::Class(name) => self.class(name),
            TypeName::Parameterized { raw, args } => {
                let args: Vec<String> = args.iter().map(|a| self.type_name(a)).collect();
                format!("{}<{}>", self.class(raw), args.join(", "))
            }
            TypeName::Array(component) => format!("{}[]", self.type_name(component)),
            TypeName::Variable(name) => name.clone(),
            TypeName::Wildcard(WildcardBound::Any) => "?".to_string(),
            TypeName::Wildcard(WildcardBound::Extends(bound)) => {
                format!("? extends {}", self.type_name(bound))
            }
            TypeName::Wildcard(WildcardBound::Super(bound)) => {
                format!("? super {}", self.type_name(bound))
            }
        }
    }

    /// Import statements' targets, sorted.
    pub fn imports(&self) -> Vec<String> {
        self.by_simple
            .values()
            .filter(|top| {
                let package = top.package();
                !package.is_empty() && package != "java.lang" && package != self.package
            })
            .map(ClassName::canonical_name)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_registration_wins() {
        let mut names = Names::new("com.example", "FooModule");
        let named = ClassName::get("javax.inject", "Named");
        let other = ClassName::get("com.other", "Named");
        names.register(&named);
        names.register(&other);

        assert_eq!(names.class(&named), "Named");
        assert_eq!(names.class(&other), "com.other.Named");
        assert_eq!(names.imports(), ["javax.inject.Named"]);
    }

    #[test]
    fn test_own_name_is_reserved() {
        let mut names = Names::new("com.example", "Status");
        let foreign = ClassName::get("com.other", "Status");
        names.register(&foreign);
        assert_eq!(names.class(&foreign), "com.other.Status");
        assert!(names.imports().is_empty());
    }

    #[test]
    fn test_nested_classes_import_top_level() {
        let mut names = Names::new("com.example", "UserJsonAdapter");
        let options = ClassName::get("com.squareup.moshi", "JsonReader.Options");
        names.register(&options);
        assert_eq!(names.class(&options), "JsonReader.Options");
        assert_eq!(names.imports(), ["com.squareup.moshi.JsonReader"]);
    }

    #[test]
    fn test_java_lang_and_same_package_not_imported() {
        let mut names = Names::new("com.example", "Module");
        names.register(&ClassName::get("java.lang", "Object"));
        names.register(&ClassName::get("com.example", "Foo"));
        assert!(names.imports().is_empty());
        assert_eq!(names.class(&ClassName::get("com.example", "Foo")), "Foo");
    }

    #[test]
    fn test_type_rendering() {
        let mut names = Names::new("com.example", "Module");
        let ty = TypeName::parameterized(
            ClassName::get("java.lang", "Class"),
            vec![TypeName::Wildcard(WildcardBound::Extends(Box::new(
                TypeName::class(ClassName::get("androidx.lifecycle", "ViewModel")),
            )))],
        );
        names.register_type(&ty);
        assert_eq!(names.type_name(&ty), "Class<? extends ViewModel>");
    }
}
