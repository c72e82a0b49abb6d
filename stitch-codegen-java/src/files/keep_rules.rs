//! Shrinker keep rules beside a class adapter.

use stitch_codegen::{ArtifactKind, FileIdentity, GeneratedArtifact, KeepRules};

/// `META-INF/proguard/moshi-{Declaration}.pro`
pub struct KeepRulesFile<'a> {
    pub rules: &'a KeepRules,
}

impl KeepRulesFile<'_> {
    pub fn artifact(&self) -> GeneratedArtifact {
        GeneratedArtifact::new(
            ArtifactKind::KeepRules,
            FileIdentity::Resource {
                path: self.rules.path(),
            },
            self.rules.target.clone(),
            self.rules.render(),
        )
    }
}
