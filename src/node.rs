//! Input tree: nodes, node kinds, and stable node identity.

use std::fmt;

use crate::props::LayoutProps;

// =============================================================================
// NodeId
// =============================================================================

/// Stable per-node identity assigned by the embedder, typically an arena
/// index.
///
/// The engine never allocates ids; it only uses them as cache keys and dirty
/// set members. If an embedder reuses an id for a structurally different
/// node it must call [`crate::cache::LayoutCache::forget`] first, or stale
/// sizes may prune re-layout incorrectly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// NodeKind
// =============================================================================

/// Kind tag deciding which layout routine handles a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Flex stack container; `props.direction` picks the main axis.
    Box,

    // Virtualized collections: fill available space, renderer draws items.
    List,
    Table,
    Tree,
    FilePicker,
    Editor,
    DiffViewer,
    Console,

    // Split containers.
    /// Panels separated by fixed dividers.
    SplitPane,
    /// Panels with no divider reservation.
    PanelGroup,

    // Overlay containers.
    /// Children stacked at the same origin in painter's order.
    Layers,
    /// Centered box clamped inside the viewport.
    Modal,
    /// Anchored overlay taking no flow space.
    Dropdown,

    // Leaves measured by an external collaborator.
    Text,
    Input,
    /// Fixed-extent blank leaf resolved from its `size` prop.
    Spacer,
    /// Embedder-registered foreign widget, routed to the external measurer.
    Custom(u16),
}

impl NodeKind {
    /// Kinds whose children this engine lays out itself.
    pub const fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Box
                | Self::SplitPane
                | Self::PanelGroup
                | Self::Layers
                | Self::Modal
                | Self::Dropdown
        )
    }

    /// Virtualized collection kinds (single rect plus scroll metadata).
    pub const fn is_collection(&self) -> bool {
        matches!(
            self,
            Self::List
                | Self::Table
                | Self::Tree
                | Self::FilePicker
                | Self::Editor
                | Self::DiffViewer
                | Self::Console
        )
    }

    /// Overlay kinds (stacked outside normal flow rules).
    pub const fn is_overlay(&self) -> bool {
        matches!(self, Self::Layers | Self::Modal | Self::Dropdown)
    }

    /// Leaf kinds measured outside this engine.
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Text | Self::Input | Self::Spacer | Self::Custom(_))
    }

    /// Stable name for logs and error details.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::List => "list",
            Self::Table => "table",
            Self::Tree => "tree",
            Self::FilePicker => "file-picker",
            Self::Editor => "editor",
            Self::DiffViewer => "diff-viewer",
            Self::Console => "console",
            Self::SplitPane => "split-pane",
            Self::PanelGroup => "panel-group",
            Self::Layers => "layers",
            Self::Modal => "modal",
            Self::Dropdown => "dropdown",
            Self::Text => "text",
            Self::Input => "input",
            Self::Spacer => "spacer",
            Self::Custom(_) => "custom",
        }
    }
}

// =============================================================================
// Node
// =============================================================================

/// One node of the input tree.
///
/// `children` may contain `None` slots: gaps preserve positional identity
/// for stable keying across frames and produce no layout output.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub props: LayoutProps,
    pub children: Vec<Option<Node>>,
}

impl Node {
    /// Create a childless node.
    pub fn new(id: u32, kind: NodeKind, props: LayoutProps) -> Self {
        Self {
            id: NodeId(id),
            kind,
            props,
            children: Vec::new(),
        }
    }

    /// Attach children, `None` slots included.
    pub fn with_children(mut self, children: Vec<Option<Node>>) -> Self {
        self.children = children;
        self
    }

    /// Iterate present children with their original slot index.
    pub fn present_children(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(slot, child)| child.as_ref().map(|c| (slot, c)))
    }

    /// Count children participating in flow sizing.
    ///
    /// Excludes gaps and absolutely positioned children.
    pub fn flow_child_count(&self) -> usize {
        self.present_children()
            .filter(|(_, c)| !c.props.is_absolute())
            .count()
    }
}
