//! Synthesis phase - renders targets and adapter models into Java sources.

use std::collections::{HashMap, HashSet};

use eyre::Result;
use stitch_codegen::{
    CodegenError, FileIdentity, GeneratedArtifact,
    pipeline::{Phase, RoundContext},
    resolve::GenerationTarget,
};
use stitch_ir::TypeElement;
use tracing::{debug, warn};

use crate::files::{
    AssistedFactoryMapping, BindingModule, ClassAdapter, DaggerAssistedFactory, EnumAdapter,
    JavaSource, KeepRulesFile, MultibindingModule, NetworkServiceModule, ViewModelClassMapping,
    ViewModelModule,
};

/// Phase that turns every surviving target into artifacts.
///
/// Class adapters come from the merged models rather than the targets, so a
/// declaration whose merge failed produces nothing. Output names must be
/// unique within a round: a group whose file identity is already taken is
/// reported against its declaration and dropped.
pub struct SynthesizePhase;

/// Files that are emitted or dropped together.
struct Group {
    declaration: String,
    artifacts: Vec<GeneratedArtifact>,
    element: Option<TypeElement>,
}

impl Group {
    fn new(declaration: String, artifacts: Vec<GeneratedArtifact>) -> Self {
        Self {
            declaration,
            artifacts,
            element: None,
        }
    }

    /// First identity already claimed, by this group or an earlier one.
    fn collision(
        &self,
        claimed: &HashMap<FileIdentity, String>,
    ) -> Option<(&FileIdentity, String)> {
        let mut own = HashSet::new();
        self.artifacts.iter().find_map(|artifact| {
            let identity = &artifact.identity;
            match claimed.get(identity) {
                Some(first) => Some((identity, first.clone())),
                None if !own.insert(identity) => Some((identity, self.declaration.clone())),
                None => None,
            }
        })
    }
}

impl SynthesizePhase {
    fn groups(ctx: &RoundContext) -> Vec<Group> {
        let config = &ctx.config;
        let mut groups = Vec::new();

        for target in &ctx.targets {
            let canonical = target.declaration().canonical_name();
            match target {
                GenerationTarget::Binding {
                    declaration,
                    bound,
                    exclude_qualifier,
                } => groups.push(Group::new(
                    canonical,
                    vec![
                        BindingModule {
                            declaration,
                            bound,
                            exclude_qualifier: *exclude_qualifier,
                            config,
                        }
                        .artifact(),
                    ],
                )),
                GenerationTarget::Multibinding {
                    declaration,
                    bound,
                    binding_kind,
                    contributor,
                } => groups.push(Group::new(
                    canonical,
                    vec![
                        MultibindingModule {
                            declaration,
                            bound,
                            binding_kind: *binding_kind,
                            contributor: *contributor,
                            config,
                        }
                        .artifact(),
                    ],
                )),
                GenerationTarget::ViewModel {
                    declaration,
                    interface,
                    additional,
                } => {
                    groups.push(Group::new(
                        canonical.clone(),
                        vec![
                            ViewModelClassMapping {
                                declaration,
                                interface,
                                config,
                            }
                            .artifact(),
                            ViewModelModule { declaration, config }.artifact(),
                        ],
                    ));
                    // Each additional interface stands on its own.
                    for interface in additional {
                        groups.push(Group::new(
                            canonical.clone(),
                            vec![
                                ViewModelClassMapping {
                                    declaration,
                                    interface,
                                    config,
                                }
                                .artifact(),
                            ],
                        ));
                    }
                }
                GenerationTarget::AssistedFactory {
                    declaration,
                    implementation,
                } => groups.push(Group::new(
                    canonical,
                    vec![
                        DaggerAssistedFactory {
                            declaration,
                            implementation,
                            config,
                        }
                        .artifact(),
                        AssistedFactoryMapping { declaration, config }.artifact(),
                    ],
                )),
                GenerationTarget::EnumAdapter {
                    declaration,
                    fallback,
                } => {
                    let adapter = EnumAdapter {
                        declaration,
                        fallback,
                        config,
                    };
                    let mut group = Group::new(canonical, vec![adapter.artifact()]);
                    group.element = Some(adapter.generated_element());
                    groups.push(group);
                }
                GenerationTarget::NetworkService { declaration, scope } => groups.push(Group::new(
                    canonical,
                    vec![
                        NetworkServiceModule {
                            declaration,
                            scope: *scope,
                            config,
                        }
                        .artifact(),
                    ],
                )),
                GenerationTarget::JsonAdapter { .. } => {}
            }
        }

        for (canonical, model) in &ctx.adapters {
            let adapter = ClassAdapter { model, config };
            let mut artifacts = vec![adapter.artifact()];
            if config.generate_keep_rules {
                let rules = adapter.keep_rules();
                artifacts.push(KeepRulesFile { rules: &rules }.artifact());
            }
            groups.push(Group::new(canonical.clone(), artifacts));
        }

        groups
    }
}

impl Phase for SynthesizePhase {
    fn name(&self) -> &'static str {
        "synthesize"
    }

    fn description(&self) -> &'static str {
        "Render generation targets into Java sources and keep rules"
    }

    fn run(&self, ctx: &mut RoundContext) -> Result<()> {
        let mut claimed: HashMap<FileIdentity, String> = HashMap::new();

        for group in Self::groups(ctx) {
            if let Some((identity, first)) = group.collision(&claimed) {
                let err = CodegenError::DuplicateOutput {
                    declaration: group.declaration.clone(),
                    identity: identity.to_string(),
                    first,
                };
                warn!(declaration = %group.declaration, code = err.code(), "skipping: {err}");
                ctx.add_codegen_error(self.name(), &group.declaration, &err);
                continue;
            }

            debug!(
                declaration = %group.declaration,
                files = group.artifacts.len(),
                "synthesized"
            );
            for artifact in &group.artifacts {
                claimed.insert(artifact.identity.clone(), group.declaration.clone());
            }
            ctx.artifacts.extend(group.artifacts);
            ctx.generated_elements.extend(group.element);
        }

        Ok(())
    }
}
