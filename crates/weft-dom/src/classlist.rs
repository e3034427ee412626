//! DOMTokenList (classList) and inline style helpers
//!
//! Both operate on the element's attribute string, so the attribute stays
//! the single source of truth.

use crate::{DomResult, DomTree, NodeId};

/// DOMTokenList for managing space-separated tokens (e.g., classList)
#[derive(Debug, Clone, Default)]
pub struct DOMTokenList {
    tokens: Vec<String>,
}

impl DOMTokenList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from space-separated string
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            list.add(token);
        }
        list
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a token
    pub fn add(&mut self, token: &str) {
        if !token.is_empty() && !self.contains(token) {
            self.tokens.push(token.to_string());
        }
    }

    /// Remove a token
    pub fn remove(&mut self, token: &str) {
        self.tokens.retain(|t| t != token);
    }

    /// Get number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Serialize back to attribute form
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }
}

impl DomTree {
    /// Class list of an element
    pub fn class_list(&self, id: NodeId) -> DOMTokenList {
        DOMTokenList::from_string(self.attribute(id, "class").unwrap_or(""))
    }

    /// Add a class to an element
    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let mut list = self.class_list(id);
        list.add(class);
        self.set_attribute(id, "class", &list.value())?;
        Ok(())
    }

    /// Remove a class from an element
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let mut list = self.class_list(id);
        list.remove(class);
        self.set_attribute(id, "class", &list.value())?;
        Ok(())
    }

    /// Read one declaration from the inline `style` attribute
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        parse_style(self.attribute(id, "style").unwrap_or(""))
            .into_iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    /// Set one declaration in the inline `style` attribute
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) -> DomResult<()> {
        let mut decls = parse_style(self.attribute(id, "style").unwrap_or(""));
        match decls.iter_mut().find(|(name, _)| name == property) {
            Some(decl) => decl.1 = value.to_string(),
            None => decls.push((property.to_string(), value.to_string())),
        }
        let style = decls.iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(id, "style", &style)?;
        Ok(())
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style.split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            (!name.is_empty()).then(|| (name.to_ascii_lowercase(), value.trim().to_string()))
        })
        .collect()
}
