//! Groups converted operations into mods and names their interfaces

use crate::naming::NameMapper;
use origin_sync_common::{Interface, Mod, Parameter, StandardDataType};
use std::collections::BTreeMap;

/// One operation after dialect-specific conversion
#[derive(Debug, Clone)]
pub(crate) struct OperationEntry {
    pub tags: Vec<String>,
    pub operation_id: Option<String>,
    pub method: &'static str,
    pub path: String,
    pub description: Option<String>,
    pub parameters: Vec<Parameter>,
    pub response: StandardDataType,
}

/// A top-level tag declaration
#[derive(Debug, Clone)]
pub(crate) struct TagInfo {
    pub name: String,
    pub description: Option<String>,
}

/// Build mods from converted operations
///
/// Mods follow the order of the declared tags, then undeclared tags in the
/// order they are first used. An operation belongs to its first tag, or to a
/// mod named after its first literal path segment when it has none. Tags
/// without operations produce no mod.
pub(crate) fn assemble_mods(
    entries: Vec<OperationEntry>,
    declared_tags: &[TagInfo],
    using_operation_id: bool,
) -> Vec<Mod> {
    let mut groups: Vec<(String, Vec<OperationEntry>)> = declared_tags
        .iter()
        .map(|tag| (tag.name.clone(), Vec::new()))
        .collect();

    for entry in entries {
        let key = entry
            .tags
            .first()
            .cloned()
            .unwrap_or_else(|| NameMapper::mod_from_path(&entry.path));

        match groups.iter_mut().find(|(name, _)| *name == key) {
            Some((_, members)) => members.push(entry),
            None => groups.push((key, vec![entry])),
        }
    }

    groups
        .into_iter()
        .filter(|(_, members)| !members.is_empty())
        .map(|(tag, members)| {
            let description = declared_tags
                .iter()
                .find(|t| t.name == tag)
                .and_then(|t| t.description.clone());
            build_mod(tag, description, members, using_operation_id)
        })
        .collect()
}

/// The response that describes a successful call
///
/// `200`, then `201`, then any other `2xx`, then `default`.
pub(crate) fn success_response<R>(responses: &BTreeMap<String, R>) -> Option<&R> {
    responses
        .get("200")
        .or_else(|| responses.get("201"))
        .or_else(|| {
            responses
                .iter()
                .find(|(status, _)| status.starts_with('2'))
                .map(|(_, response)| response)
        })
        .or_else(|| responses.get("default"))
}

fn build_mod(
    tag: String,
    description: Option<String>,
    members: Vec<OperationEntry>,
    using_operation_id: bool,
) -> Mod {
    let mut names: Vec<String> = members
        .iter()
        .map(|entry| interface_name(entry, using_operation_id))
        .collect();
    NameMapper::dedupe(&mut names);

    let interfaces = members
        .into_iter()
        .zip(names)
        .map(|(entry, name)| Interface {
            name,
            method: entry.method.to_string(),
            path: entry.path,
            description: entry.description,
            parameters: entry.parameters,
            response: entry.response,
        })
        .collect();

    // Tags in languages without ASCII identifiers keep their original text
    let camel = NameMapper::to_camel_case(&tag);
    let name = if camel.is_empty() { tag } else { camel };

    Mod {
        name,
        description,
        interfaces,
    }
}

fn interface_name(entry: &OperationEntry, using_operation_id: bool) -> String {
    let from_operation_id = entry
        .operation_id
        .as_deref()
        .filter(|_| using_operation_id)
        .map(NameMapper::from_operation_id)
        .filter(|name| !name.is_empty());

    from_operation_id.unwrap_or_else(|| NameMapper::from_path(entry.method, &entry.path))
}
