//! Identifier naming for interfaces, mods and base classes

use origin_sync_common::StandardDataType;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// springfox appends `Using<METHOD>` (and `_<n>` on clashes) to operation ids
fn springfox_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Using(GET|POST|PUT|PATCH|DELETE|HEAD|OPTIONS)(_\d+)?$")
            .expect("springfox suffix pattern is valid")
    })
}

fn non_identifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_$]+").expect("identifier pattern is valid"))
}

/// Maps document names to identifiers
pub struct NameMapper;

impl NameMapper {
    /// Interface name from an `operationId`
    ///
    /// # Examples
    /// ```
    /// use origin_sync_parser::NameMapper;
    ///
    /// assert_eq!(NameMapper::from_operation_id("getPetByIdUsingGET"), "getPetById");
    /// assert_eq!(NameMapper::from_operation_id("list-pets"), "listPets");
    /// ```
    pub fn from_operation_id(operation_id: &str) -> String {
        let trimmed = springfox_suffix().replace(operation_id, "");
        Self::to_camel_case(&trimmed)
    }

    /// Interface name derived from method and path
    ///
    /// # Examples
    /// ```
    /// use origin_sync_parser::NameMapper;
    ///
    /// assert_eq!(NameMapper::from_path("get", "/pet/{petId}"), "getPetByPetId");
    /// assert_eq!(NameMapper::from_path("post", "/store/order"), "postStoreOrder");
    /// assert_eq!(NameMapper::from_path("get", "/"), "get");
    /// ```
    pub fn from_path(method: &str, path: &str) -> String {
        let mut name = method.to_lowercase();

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if let Some(param) = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            {
                name.push_str("By");
                name.push_str(&Self::to_pascal_case(param));
            } else {
                name.push_str(&Self::to_pascal_case(segment));
            }
        }

        name
    }

    /// Mod name for an operation without tags: first literal path segment
    pub fn mod_from_path(path: &str) -> String {
        path.split('/')
            .find(|s| !s.is_empty() && !s.starts_with('{'))
            .map(Self::to_camel_case)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "default".to_string())
    }

    /// Convert any separated or cased name to camelCase
    pub fn to_camel_case(s: &str) -> String {
        let pascal = Self::to_pascal_case(s);
        let mut chars = pascal.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Convert any separated or cased name to PascalCase
    pub fn to_pascal_case(s: &str) -> String {
        non_identifier()
            .split(s)
            .flat_map(|word| word.split('_'))
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect()
    }

    /// Make `names` unique by appending 1, 2, ... to later duplicates
    pub fn dedupe(names: &mut [String]) {
        let mut seen: HashSet<String> = HashSet::new();

        for name in names.iter_mut() {
            if seen.insert(name.clone()) {
                continue;
            }
            let mut counter = 1;
            while seen.contains(&format!("{name}{counter}")) {
                counter += 1;
            }
            *name = format!("{name}{counter}");
            seen.insert(name.clone());
        }
    }
}

/// A possibly generic definition name such as `Result«List«Pet»»`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericName {
    pub base: String,
    pub args: Vec<GenericName>,
}

impl GenericName {
    /// Parse a definition name; both `«»` and `<>` brackets are accepted
    ///
    /// # Examples
    /// ```
    /// use origin_sync_parser::GenericName;
    ///
    /// let name = GenericName::parse("Result«List«Pet»»");
    /// assert_eq!(name.base, "Result");
    /// assert_eq!(name.args[0].base, "List");
    /// assert_eq!(name.args[0].args[0].base, "Pet");
    /// ```
    pub fn parse(name: &str) -> Self {
        let chars: Vec<char> = name.chars().collect();
        let mut pos = 0;
        Self::parse_at(&chars, &mut pos)
    }

    fn parse_at(chars: &[char], pos: &mut usize) -> Self {
        let mut base = String::new();
        while *pos < chars.len() && !matches!(chars[*pos], '«' | '<' | '»' | '>' | ',') {
            base.push(chars[*pos]);
            *pos += 1;
        }

        let mut args = Vec::new();
        if *pos < chars.len() && matches!(chars[*pos], '«' | '<') {
            *pos += 1;
            loop {
                args.push(Self::parse_at(chars, pos));
                match chars.get(*pos) {
                    Some(',') => *pos += 1,
                    Some('»') | Some('>') => {
                        *pos += 1;
                        break;
                    }
                    _ => break,
                }
            }
        }

        GenericName {
            base: base.trim().to_string(),
            args,
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }

    /// Map the name onto a standard type
    ///
    /// Java collection and boxed primitive names that springfox leaks into
    /// definition names are mapped to their standard equivalents.
    pub fn to_data_type(&self) -> StandardDataType {
        match (self.base.as_str(), self.args.as_slice()) {
            ("List" | "Array" | "Set" | "Collection" | "Iterable", [item]) => {
                StandardDataType::Array(Box::new(item.to_data_type()))
            }
            ("Map" | "HashMap", [_, value]) => StandardDataType::Map(Box::new(value.to_data_type())),
            (base, []) => Self::primitive(base).unwrap_or_else(|| {
                StandardDataType::reference(NameMapper::to_pascal_case(base))
            }),
            (base, args) => StandardDataType::Reference {
                name: NameMapper::to_pascal_case(base),
                args: args.iter().map(GenericName::to_data_type).collect(),
            },
        }
    }

    fn primitive(name: &str) -> Option<StandardDataType> {
        let data_type = match name {
            "string" | "String" | "char" | "Date" | "LocalDate" | "LocalDateTime" => {
                StandardDataType::String
            }
            "int" | "integer" | "Integer" | "long" | "Long" | "short" | "Short" | "int32"
            | "int64" => StandardDataType::Integer,
            "number" | "double" | "Double" | "float" | "Float" | "BigDecimal" => {
                StandardDataType::Number
            }
            "boolean" | "Boolean" | "bool" => StandardDataType::Boolean,
            "object" | "Object" | "JSONObject" => StandardDataType::Object,
            "Void" | "void" => StandardDataType::Any,
            _ => return None,
        };
        Some(data_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_operation_id_strips_springfox_suffix() {
        assert_eq!(NameMapper::from_operation_id("addPetUsingPOST"), "addPet");
        assert_eq!(NameMapper::from_operation_id("findUsingGET_1"), "find");
        assert_eq!(NameMapper::from_operation_id("updateUser"), "updateUser");
        assert_eq!(NameMapper::from_operation_id("Pets_List"), "petsList");
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(NameMapper::to_pascal_case("pet-store api"), "PetStoreApi");
        assert_eq!(NameMapper::to_camel_case("User_Profile"), "userProfile");
        assert_eq!(NameMapper::to_camel_case(""), "");
    }

    #[test]
    fn test_mod_from_path() {
        assert_eq!(NameMapper::mod_from_path("/user-profile/{id}"), "userProfile");
        assert_eq!(NameMapper::mod_from_path("/{tenant}/orders"), "orders");
        assert_eq!(NameMapper::mod_from_path("/"), "default");
    }

    #[test]
    fn test_dedupe() {
        let mut names = vec![
            "get".to_string(),
            "get".to_string(),
            "get1".to_string(),
            "get".to_string(),
        ];
        NameMapper::dedupe(&mut names);
        assert_eq!(names, vec!["get", "get1", "get11", "get2"]);
    }

    #[test]
    fn test_generic_name_to_data_type() {
        assert_eq!(
            GenericName::parse("Result«List«Pet»»").to_data_type(),
            StandardDataType::Reference {
                name: "Result".to_string(),
                args: vec![StandardDataType::Array(Box::new(
                    StandardDataType::reference("Pet")
                ))],
            }
        );
        assert_eq!(
            GenericName::parse("Map<string,Order>").to_data_type(),
            StandardDataType::Map(Box::new(StandardDataType::reference("Order")))
        );
        assert_eq!(GenericName::parse("long").to_data_type(), StandardDataType::Integer);
        assert!(!GenericName::parse("Pet").is_generic());
    }
}
