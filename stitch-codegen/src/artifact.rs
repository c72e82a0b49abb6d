//! Synthesized output artifacts.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::Serialize;
use stitch_core::GeneratedFile;
use stitch_ir::ClassName;

/// What an artifact is, for reporting and naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    BindingModule,
    MultibindingModule,
    ViewModelClassMapping,
    ViewModelModule,
    AssistedFactory,
    AssistedFactoryMapping,
    EnumAdapter,
    ClassAdapter,
    NetworkServiceModule,
    KeepRules,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BindingModule => "binding-module",
            Self::MultibindingModule => "multibinding-module",
            Self::ViewModelClassMapping => "view-model-class-mapping",
            Self::ViewModelModule => "view-model-module",
            Self::AssistedFactory => "assisted-factory",
            Self::AssistedFactoryMapping => "assisted-factory-mapping",
            Self::EnumAdapter => "enum-adapter",
            Self::ClassAdapter => "class-adapter",
            Self::NetworkServiceModule => "network-service-module",
            Self::KeepRules => "keep-rules",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an artifact lands. Deterministic from the originating declaration
/// and the artifact kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileIdentity {
    /// A Java source file.
    Source { package: String, simple_name: String },
    /// A resource file, by relative path.
    Resource { path: String },
}

impl FileIdentity {
    pub fn source(name: &ClassName) -> Self {
        Self::Source {
            package: name.package().to_string(),
            simple_name: name.simple_name().to_string(),
        }
    }

    /// Path relative to the output root.
    pub fn relative_path(&self) -> PathBuf {
        match self {
            Self::Source {
                package,
                simple_name,
            } => {
                let mut path = PathBuf::from("java");
                for segment in package.split('.').filter(|s| !s.is_empty()) {
                    path.push(segment);
                }
                path.push(format!("{simple_name}.java"));
                path
            }
            Self::Resource { path } => Path::new("resources").join(path),
        }
    }
}

impl fmt::Display for FileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source {
                package,
                simple_name,
            } if package.is_empty() => write!(f, "{simple_name}"),
            Self::Source {
                package,
                simple_name,
            } => write!(f, "{package}.{simple_name}"),
            Self::Resource { path } => write!(f, "{path}"),
        }
    }
}

/// One synthesized file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub identity: FileIdentity,
    /// The declaration this artifact was derived from. Only read by writers.
    pub originating: ClassName,
    pub contents: String,
}

impl GeneratedArtifact {
    pub fn new(
        kind: ArtifactKind,
        identity: FileIdentity,
        originating: ClassName,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            identity,
            originating,
            contents: contents.into(),
        }
    }
}

impl GeneratedFile for GeneratedArtifact {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.identity.relative_path())
    }

    fn render(&self) -> String {
        self.contents.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_path() {
        let identity = FileIdentity::source(&ClassName::get("com.example.di", "BarFooBindingModule"));
        assert_eq!(
            identity.relative_path(),
            Path::new("java/com/example/di/BarFooBindingModule.java")
        );
        assert_eq!(identity.to_string(), "com.example.di.BarFooBindingModule");
    }

    #[test]
    fn test_resource_path() {
        let identity = FileIdentity::Resource {
            path: "META-INF/proguard/moshi-com.example.User.pro".into(),
        };
        assert_eq!(
            identity.relative_path(),
            Path::new("resources/META-INF/proguard/moshi-com.example.User.pro")
        );
    }

    #[test]
    fn test_default_package_source() {
        let identity = FileIdentity::source(&ClassName::get("", "Foo"));
        assert_eq!(identity.relative_path(), Path::new("java/Foo.java"));
        assert_eq!(identity.to_string(), "Foo");
    }
}
