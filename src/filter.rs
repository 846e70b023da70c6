//! Spawn exclusion filter
//! Keeps the trail effect off readable and interactive page content

// ============================================================================
// Pointer Target Description
// ============================================================================

/// Element categories the filter cares about. Anything that carries text or
/// is clickable suppresses the effect; `Generic` covers neutral containers
/// and empty page regions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ElementKind {
    Paragraph,
    Heading(u8),
    Span,
    Anchor,
    Button,
    Label,
    Generic,
}

impl ElementKind {
    pub fn is_text_bearing(self) -> bool {
        !matches!(self, ElementKind::Generic)
    }
}

/// Structural metadata for one element in the hovered chain.
#[derive(Clone, Debug)]
pub struct ElementInfo {
    pub kind: ElementKind,
    pub classes: Vec<String>,
    pub role: Option<String>,
}

impl ElementInfo {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            classes: Vec::new(),
            role: None,
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }
}

/// What the pointer is currently over: the element itself plus its enclosing
/// ancestors, innermost first. The host page supplies this; the filter never
/// inspects page structure directly.
#[derive(Clone, Debug)]
pub struct PointerTarget {
    pub element: ElementInfo,
    pub ancestors: Vec<ElementInfo>,
}

impl PointerTarget {
    pub fn new(element: ElementInfo) -> Self {
        Self {
            element,
            ancestors: Vec::new(),
        }
    }

    /// A bare region with no classes, role, or text: always spawn-eligible.
    pub fn generic() -> Self {
        Self::new(ElementInfo::new(ElementKind::Generic))
    }

    pub fn with_ancestor(mut self, ancestor: ElementInfo) -> Self {
        self.ancestors.push(ancestor);
        self
    }

    fn chain(&self) -> impl Iterator<Item = &ElementInfo> {
        std::iter::once(&self.element).chain(self.ancestors.iter())
    }
}

// ============================================================================
// Spawn Filter
// ============================================================================

/// Pluggable exclusion predicate. An event is skipped when the target or any
/// ancestor matches a class-name fragment, carries an excluded role, or is a
/// text-bearing element.
#[derive(Clone, Debug)]
pub struct SpawnFilter {
    pub class_fragments: Vec<String>,
    pub excluded_roles: Vec<String>,
}

impl Default for SpawnFilter {
    fn default() -> Self {
        Self {
            class_fragments: vec![
                "card".to_string(),
                "modal".to_string(),
                "dialog".to_string(),
            ],
            excluded_roles: vec!["dialog".to_string()],
        }
    }
}

impl SpawnFilter {
    pub fn should_skip(&self, target: &PointerTarget) -> bool {
        target.chain().any(|el| self.matches(el))
    }

    fn matches(&self, el: &ElementInfo) -> bool {
        if el.kind.is_text_bearing() {
            return true;
        }
        if let Some(role) = &el.role {
            if self.excluded_roles.iter().any(|r| r == role) {
                return true;
            }
        }
        el.classes
            .iter()
            .any(|class| self.class_fragments.iter().any(|f| class.contains(f)))
    }
}
