//! Turning route declarations into concrete route specs: resource
//! expansion, `"controller#action"` parsing, and the English inflection the
//! conventional aliases lean on.

use crate::error::BindError;
use crate::http::Method;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// One resolved binding, immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    pub method: Method,
    pub path: String,
    pub controller: String,
    pub action: String,
    pub alias: Option<String>,
    pub version: Option<String>,
}

/// Declaration options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Controller qualifier for versioned routers.
    pub version: Option<String>,
    /// Literal path segment prepended to the resource URL.
    pub prefix: Option<String>,
    /// Overrides the URL segment; the resource name still picks the
    /// controller.
    pub path: Option<String>,
    /// Alias base for path helpers and singular-name derivation.
    pub alias: Option<String>,
}

impl Options {
    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }
}

/// Splits `"controller#action"`. Both halves must be non-empty; the
/// silent-skip tolerance is for absent controllers and actions, not for
/// references that cannot name an action at all.
pub fn parse_action_ref(spec: &str) -> Result<(&str, &str), BindError> {
    match spec.split_once('#') {
        Some((controller, action)) if !controller.is_empty() && !action.is_empty() => {
            Ok((controller, action))
        }
        _ => Err(BindError::InvalidActionRef(spec.to_string())),
    }
}

/// Expands a resource declaration into its seven conventional bindings.
///
/// `destroy` is emitted under the legacy `Del` verb and again under the
/// standard `Delete` verb when the server exposes it. Every derived value
/// (segment, prefix, singular form) is computed up front.
pub fn expand_resource(resource: &str, options: &Options, standard_delete: bool) -> Vec<RouteSpec> {
    let segment = options.path.as_deref().unwrap_or(resource);
    let plural = options.alias.as_deref().unwrap_or(resource);
    let singular = singularize(plural);
    let root = match options.prefix.as_deref() {
        Some(prefix) => format!("/{}/{}", prefix.trim_matches('/'), segment),
        None => format!("/{}", segment),
    };
    let member = format!("{}/:id", root);

    let spec = |method: Method, path: String, action: &str, alias: Option<String>| RouteSpec {
        method,
        path,
        controller: resource.to_string(),
        action: action.to_string(),
        alias,
        version: options.version.clone(),
    };

    let mut routes = vec![
        spec(Method::Get, root.clone(), "index", Some(plural.to_string())),
        spec(
            Method::Get,
            format!("{}/new", root),
            "new",
            Some(format!("new{}", capitalize(&singular))),
        ),
        spec(Method::Get, member.clone(), "show", Some(singular.clone())),
        spec(
            Method::Get,
            format!("{}/edit", member),
            "edit",
            Some(format!("edit{}", capitalize(&singular))),
        ),
        spec(Method::Post, root, "create", None),
        spec(Method::Put, member.clone(), "update", Some(singular.clone())),
        spec(Method::Del, member.clone(), "destroy", Some(singular.clone())),
    ];
    if standard_delete {
        routes.push(spec(Method::Delete, member, "destroy", Some(singular)));
    }
    routes
}

lazy_static! {
    static ref IRREGULAR_SINGULARS: HashMap<&'static str, &'static str> = {
        let mut table = HashMap::new();
        table.insert("people", "person");
        table.insert("children", "child");
        table.insert("men", "man");
        table.insert("women", "woman");
        table.insert("geese", "goose");
        table.insert("mice", "mouse");
        table.insert("feet", "foot");
        table.insert("teeth", "tooth");
        table.insert("oxen", "ox");
        table
    };
}

/// Singular form of an English plural: irregular table first, then the
/// regular suffix rules.
pub fn singularize(word: &str) -> String {
    if let Some(singular) = IRREGULAR_SINGULARS.get(word) {
        return singular.to_string();
    }
    if word.len() > 3 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if word.len() > 2
        && (word.ends_with("ches")
            || word.ends_with("shes")
            || word.ends_with("sses")
            || word.ends_with("xes")
            || word.ends_with("zes"))
    {
        return word[..word.len() - 2].to_string();
    }
    if word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
