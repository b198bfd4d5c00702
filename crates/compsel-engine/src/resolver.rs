//! Resolution of a rule's declared inputs into concrete values.

use smallvec::SmallVec;

use compsel_core::{InputType, MetadataFetchError, ModuleMetadata, RuleInput};

use crate::provider::MetadataProvider;

/// Inputs resolved for one rule, in declaration order.
pub type ResolvedInputs<'a> = SmallVec<[RuleInput<'a>; 3]>;

/// Resolves `input_types` against the provider.
///
/// Returns `Ok(None)` when the rule does not apply to this candidate: it
/// asks for an Ivy descriptor and the metadata is of another format. An
/// empty declaration resolves without touching the provider.
pub fn resolve_inputs<'p, F>(
    input_types: &[InputType],
    provider: &'p mut MetadataProvider<F>,
) -> Result<Option<ResolvedInputs<'p>>, MetadataFetchError>
where
    F: FnOnce() -> Result<ModuleMetadata, MetadataFetchError>,
{
    let mut inputs = ResolvedInputs::new();
    if input_types.is_empty() {
        return Ok(Some(inputs));
    }

    let metadata = provider.full_metadata()?;
    for input_type in input_types {
        let input = match input_type {
            InputType::FullMetadata => RuleInput::Metadata(metadata),
            InputType::ComponentMetadataView => {
                RuleInput::ComponentMetadata(metadata.component_metadata())
            }
            InputType::IvyDescriptor => match metadata.ivy_descriptor() {
                Some(descriptor) => RuleInput::IvyDescriptor(descriptor),
                None => return Ok(None),
            },
        };
        inputs.push(input);
    }
    Ok(Some(inputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use compsel_test::{ivy_metadata, maven_metadata, MetadataSource};

    #[test]
    fn test_empty_declaration_does_not_fetch() {
        let source = MetadataSource::new(maven_metadata("1.0"));
        let mut provider = MetadataProvider::new(source.factory());

        let inputs = resolve_inputs(&[], &mut provider).unwrap().unwrap();
        assert!(inputs.is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[test]
    fn test_inputs_follow_declaration_order() {
        let source = MetadataSource::new(ivy_metadata("1.0", None));
        let mut provider = MetadataProvider::new(source.factory());
        let declared = [
            InputType::IvyDescriptor,
            InputType::FullMetadata,
            InputType::ComponentMetadataView,
        ];

        let inputs = resolve_inputs(&declared, &mut provider).unwrap().unwrap();
        let resolved: Vec<InputType> = inputs.iter().map(RuleInput::input_type).collect();
        assert_eq!(resolved, declared);
    }

    #[test]
    fn test_ivy_input_on_maven_metadata_is_not_applicable() {
        let source = MetadataSource::new(maven_metadata("1.0"));
        let mut provider = MetadataProvider::new(source.factory());

        let inputs = resolve_inputs(
            &[InputType::ComponentMetadataView, InputType::IvyDescriptor],
            &mut provider,
        )
        .unwrap();
        assert!(inputs.is_none());
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn test_fetch_error_propagates() {
        let source = MetadataSource::failing("timed out");
        let mut provider = MetadataProvider::new(source.factory());

        let declared = [InputType::FullMetadata];
        let err = resolve_inputs(&declared, &mut provider).unwrap_err();
        assert_eq!(err.message(), "timed out");
    }
}
