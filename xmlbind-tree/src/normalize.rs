//! Namespace reconciliation.
//!
//! After normalization every prefix used by an element or attribute is bound
//! by a declaration in scope, and no element repeats a binding its ancestors
//! already made.

use crate::tracing_macros::trace;
use crate::{Element, NamespaceDecl, Node};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// In-scope prefix bindings, innermost last.
#[derive(Default)]
struct Scope {
    bindings: Vec<(Option<String>, String)>,
}

impl Scope {
    fn lookup(&self, prefix: Option<&str>) -> &str {
        if prefix == Some("xml") {
            return XML_NAMESPACE;
        }
        self.bindings
            .iter()
            .rev()
            .find(|(p, _)| p.as_deref() == prefix)
            .map_or("", |(_, uri)| uri.as_str())
    }

    fn bind(&mut self, prefix: Option<String>, uri: String) {
        self.bindings.push((prefix, uri));
    }
}

pub(crate) fn normalize_element(element: &mut Element) {
    let mut scope = Scope::default();
    visit(element, &mut scope);
}

fn visit(element: &mut Element, scope: &mut Scope) {
    let mark = scope.bindings.len();

    // Drop declarations that repeat the binding in scope.
    let mut kept: Vec<NamespaceDecl> = Vec::new();
    for decl in element.namespace_decls_mut().drain(..) {
        if scope.lookup(decl.prefix.as_deref()) == decl.uri {
            trace!(prefix = ?decl.prefix, uri = %decl.uri, "dropping redundant namespace declaration");
            continue;
        }
        kept.push(decl);
    }
    for decl in &kept {
        scope.bind(decl.prefix.clone(), decl.uri.clone());
    }
    *element.namespace_decls_mut() = kept;

    // Declare whatever the element itself needs.
    let prefix = element.prefix().map(str::to_owned);
    let wanted = element.namespace().unwrap_or("").to_owned();
    let unbound_prefix = prefix.is_some() && wanted.is_empty();
    if !unbound_prefix
        && prefix.as_deref() != Some("xml")
        && scope.lookup(prefix.as_deref()) != wanted
    {
        element.declare_namespace(prefix.clone(), wanted.clone());
        scope.bind(prefix, wanted);
    }

    let missing: Vec<(String, String)> = element
        .attributes()
        .iter()
        .filter_map(|attr| {
            let prefix = attr.prefix.as_deref()?;
            let uri = attr.namespace.as_deref()?;
            (prefix != "xml" && scope.lookup(Some(prefix)) != uri)
                .then(|| (prefix.to_owned(), uri.to_owned()))
        })
        .collect();
    for (prefix, uri) in missing {
        if scope.lookup(Some(&prefix)) != uri {
            element.declare_namespace(Some(prefix.clone()), uri.clone());
            scope.bind(Some(prefix), uri);
        }
    }

    for node in element.nodes_mut() {
        if let Node::Element(child) = node {
            visit(child, scope);
        }
    }

    scope.bindings.truncate(mark);
}
