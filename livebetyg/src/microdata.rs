use kuchiki::NodeRef;

/// Microdata (`itemprop`) lookup over a parsed document.
///
/// Bokadirekt's listing markup carries schema.org annotations next to the
/// visible rating widget; this is the machine-readable side the second
/// extraction pattern reads when the visible text stops matching.
pub struct Scope {
    node: NodeRef,
}

impl From<NodeRef> for Scope {
    fn from(node: NodeRef) -> Self {
        Self { node }
    }
}

impl Scope {
    /// Value of the first descendant annotated with `itemprop="{prop}"`.
    ///
    /// The `content` attribute wins when present (the `<meta>` form),
    /// otherwise the node's concatenated text is used.
    pub fn prop_value(&self, prop: &str) -> Option<String> {
        self.node
            .descendants()
            .find(|node| has_prop(node, prop))
            .map(|node| content_attribute(&node).unwrap_or_else(|| node.text_contents()))
    }
}

fn has_prop(node: &NodeRef, prop: &str) -> bool {
    node.as_element()
        .map(|element| element.attributes.borrow().get("itemprop") == Some(prop))
        .unwrap_or(false)
}

fn content_attribute(node: &NodeRef) -> Option<String> {
    node.as_element()
        .and_then(|element| element.attributes.borrow().get("content").map(str::to_string))
}
