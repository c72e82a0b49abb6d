use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source text and filename of the file being parsed.
///
/// Error factories take their source context from here so call sites only
/// pass what is specific to the error.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            filename: self.filename.clone(),
            span,
            source,
        })
    }

    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn reserved_keyword_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::ReservedKeyword {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
        })
    }

    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    pub fn duplicate_type_error(
        &self,
        name: impl Into<String>,
        first_span: SourceSpan,
        second_span: SourceSpan,
    ) -> Box<Error> {
        Box::new(Error::DuplicateType {
            src: self.named_source(),
            first_span,
            second_span,
            name: name.into(),
        })
    }

    pub fn unknown_kind_error(
        &self,
        kind: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownKind {
            src: self.named_source(),
            span,
            kind: kind.into(),
        })
    }

    pub fn invalid_type_error(
        &self,
        input: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidType {
            src: self.named_source(),
            span,
            input: input.into(),
            reason: reason.into(),
        })
    }

    pub fn unknown_marker_error(
        &self,
        key: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownMarker {
            src: self.named_source(),
            span,
            key: key.into(),
        })
    }

    pub fn invalid_generated_error(
        &self,
        value: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidGeneratedOption {
            src: self.named_source(),
            span,
            value: value.into(),
        })
    }

    pub fn invalid_class_name_error(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidClassName {
            src: self.named_source(),
            span,
            key: key.into(),
            value: value.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(stitch::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(stitch::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        filename: String,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(stitch::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("'{name}' is a Java reserved keyword")]
    #[diagnostic(
        code(stitch::reserved_keyword),
        help("'{name}' cannot be used as a {context} name in generated Java")
    )]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("reserved keyword used here")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(stitch::invalid_identifier),
        help("{reason}. Use only letters, digits, '_' and '$', starting with a letter.")
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("type '{name}' is declared twice")]
    #[diagnostic(
        code(stitch::duplicate_type),
        help("every type in a round must have a unique package and name")
    )]
    DuplicateType {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: SourceSpan,
        #[label("declared again here")]
        second_span: SourceSpan,
        name: String,
    },

    #[error("unknown type kind '{kind}'")]
    #[diagnostic(
        code(stitch::unknown_kind),
        help("valid kinds are: class, interface, enum, object, companion-object, annotation")
    )]
    UnknownKind {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown kind")]
        span: Option<SourceSpan>,
        kind: String,
    },

    #[error("invalid type '{input}'")]
    #[diagnostic(
        code(stitch::invalid_type),
        help("{reason}. Types are written like 'java.util.List<com.example.Item>?'")
    )]
    InvalidType {
        #[source_code]
        src: NamedSource<String>,
        #[label("cannot parse this type")]
        span: Option<SourceSpan>,
        input: String,
        reason: String,
    },

    #[error("unknown marker '{key}'")]
    #[diagnostic(
        code(stitch::unknown_marker),
        help(
            "valid markers are: contributes_internal_binding, contributes_multibinding, contributes_view_model, assisted_factory, json_class, json_enum_with_fallback, network_service"
        )
    )]
    UnknownMarker {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown marker")]
        span: Option<SourceSpan>,
        key: String,
    },

    #[error("unsupported generated annotation '{value}'")]
    #[diagnostic(
        code(stitch::invalid_generated_option),
        help("use 'javax.annotation.processing.Generated' or 'javax.annotation.Generated'")
    )]
    InvalidGeneratedOption {
        #[source_code]
        src: NamedSource<String>,
        #[label("not a supported annotation")]
        span: Option<SourceSpan>,
        value: String,
    },

    #[error("'{key}' is not a qualified class name: '{value}'")]
    #[diagnostic(
        code(stitch::invalid_class_name),
        help("write the fully qualified name, e.g. 'dagger.hilt.components.SingletonComponent'")
    )]
    InvalidClassName {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid class name")]
        span: Option<SourceSpan>,
        key: String,
        value: String,
    },
}
