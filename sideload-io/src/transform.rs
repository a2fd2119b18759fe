//! Sideload orchestrator

use crate::document::{SideloadContainer, SideloadDocument};
use crate::error::{Result, TransformError};
use crate::spec::TransformSpec;
use crate::target::Target;
use serde_json::Value;
use sideload_core::Limits;
use sideload_engine::{delete_properties, rename_property, replace_with_id_array};
use tracing::debug;

/// Transform `target` according to `spec` using default limits
///
/// The caller's graph is never modified; all work happens on a private copy.
pub fn transform(target: &Value, spec: &TransformSpec) -> Result<SideloadDocument> {
    transform_with_limits(target, spec, &Limits::default())
}

/// Transform `target` according to `spec` under explicit limits
#[tracing::instrument(skip_all, fields(sideloads = spec.sideloads.len()))]
pub fn transform_with_limits(
    target: &Value,
    spec: &TransformSpec,
    limits: &Limits,
) -> Result<SideloadDocument> {
    limits.validate()?;
    spec.validate(limits)?;
    let target = Target::from_value(target, limits)?;
    apply(target, spec)
}

/// Transform a graph the caller already gave up ownership of
///
/// Skips the defensive copy made by [`transform_with_limits`].
pub fn transform_owned(
    target: Value,
    spec: &TransformSpec,
    limits: &Limits,
) -> Result<SideloadDocument> {
    limits.validate()?;
    spec.validate(limits)?;
    let target = Target::from_owned(target, limits)?;
    apply(target, spec)
}

fn apply(mut target: Target, spec: &TransformSpec) -> Result<SideloadDocument> {
    let shape = target.shape();
    let wrapper_key = spec.wrapper.key_for(shape)?.to_string();

    if let Some(name) = spec
        .sideloads
        .iter()
        .filter_map(|s| s.collection.as_deref())
        .find(|name| *name == wrapper_key)
    {
        return Err(TransformError::CollectionNameCollision {
            name: name.to_string(),
        });
    }

    debug!(
        shape = shape.as_str(),
        elements = target.len(),
        wrapper = %wrapper_key,
        "starting sideload transform"
    );

    if !spec.delete.is_empty() {
        let removed: usize = target
            .elements_mut()
            .iter_mut()
            .map(|element| delete_properties(element, spec.delete.as_slice()))
            .sum();
        debug!(removed, "deleted properties");
    }

    for rename in spec.ordered_renames() {
        let renamed: usize = target
            .elements_mut()
            .iter_mut()
            .map(|element| rename_property(element, &rename.property, &rename.name))
            .sum();
        debug!(from = %rename.property, to = %rename.name, renamed, "renamed properties");
    }

    let sideloads = spec.ordered_sideloads();
    let mut collections = SideloadContainer::default();

    for sideload in &sideloads {
        let mut extracted = Vec::new();
        for element in target.elements_mut() {
            extracted.extend(replace_with_id_array(
                element,
                &sideload.property,
                &sideload.id_attribute,
            ));
        }

        match sideload.collection.as_deref() {
            Some(name) if !extracted.is_empty() => collections.append(name, extracted),
            _ => {}
        }
    }

    for sideload in &sideloads {
        if let Some(name) = sideload.collection.as_deref() {
            collections.dedup(name, &sideload.id_attribute);
        }
    }

    Ok(SideloadDocument::new(
        wrapper_key,
        target.into_value(),
        collections,
    ))
}
