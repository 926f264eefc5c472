//! Layout items (views and safe-area guides) and the raw anchors they expose

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::anchor::{impl_anchor_ops, Anchor};
use crate::composite::CompositeAnchor;

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique view identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A rectangular layout participant
///
/// `View` is a cheap-clone handle; clones refer to the same view.
#[derive(Clone)]
pub struct View(Rc<ViewData>);

struct ViewData {
    id: ViewId,
    name: String,
}

impl View {
    pub fn new(name: impl Into<String>) -> Self {
        let id = ViewId(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed));
        Self(Rc::new(ViewData {
            id,
            name: name.into(),
        }))
    }

    pub fn id(&self) -> ViewId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The guide covering the view's bounds minus its safe-area insets
    pub fn safe_area_layout_guide(&self) -> LayoutGuide {
        LayoutGuide {
            owner: self.clone(),
        }
    }
}

impl PartialEq for View {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for View {}

impl Hash for View {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("id", &self.0.id.0)
            .field("name", &self.0.name)
            .finish()
    }
}

/// Safe-area inset guide of a view
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutGuide {
    owner: View,
}

impl LayoutGuide {
    pub fn owning_view(&self) -> &View {
        &self.owner
    }
}

/// The object an anchor belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LayoutItem {
    View(View),
    SafeAreaGuide(View),
}

impl LayoutItem {
    /// The view backing this item (the owner, for guides)
    pub fn view(&self) -> &View {
        match self {
            LayoutItem::View(view) | LayoutItem::SafeAreaGuide(view) => view,
        }
    }

    pub fn is_guide(&self) -> bool {
        matches!(self, LayoutItem::SafeAreaGuide(_))
    }
}

impl fmt::Display for LayoutItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutItem::View(view) => write!(f, "{}", view.name()),
            LayoutItem::SafeAreaGuide(view) => write!(f, "{}.safe", view.name()),
        }
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// Anchor category; only anchors of the same category can be related
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorCategory {
    Horizontal,
    Vertical,
    Dimension,
}

impl fmt::Display for AnchorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnchorCategory::Horizontal => "horizontal",
            AnchorCategory::Vertical => "vertical",
            AnchorCategory::Dimension => "dimension",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XAttribute {
    Leading,
    Trailing,
    CenterX,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YAttribute {
    Top,
    Bottom,
    CenterY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionAttribute {
    Width,
    Height,
}

/// Category-erased attribute carried by constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Leading,
    Trailing,
    CenterX,
    Top,
    Bottom,
    CenterY,
    Width,
    Height,
}

impl Attribute {
    pub fn category(self) -> AnchorCategory {
        match self {
            Attribute::Leading | Attribute::Trailing | Attribute::CenterX => {
                AnchorCategory::Horizontal
            }
            Attribute::Top | Attribute::Bottom | Attribute::CenterY => AnchorCategory::Vertical,
            Attribute::Width | Attribute::Height => AnchorCategory::Dimension,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Leading => "leading",
            Attribute::Trailing => "trailing",
            Attribute::CenterX => "center_x",
            Attribute::Top => "top",
            Attribute::Bottom => "bottom",
            Attribute::CenterY => "center_y",
            Attribute::Width => "width",
            Attribute::Height => "height",
        }
    }
}

impl From<XAttribute> for Attribute {
    fn from(attribute: XAttribute) -> Self {
        match attribute {
            XAttribute::Leading => Attribute::Leading,
            XAttribute::Trailing => Attribute::Trailing,
            XAttribute::CenterX => Attribute::CenterX,
        }
    }
}

impl From<YAttribute> for Attribute {
    fn from(attribute: YAttribute) -> Self {
        match attribute {
            YAttribute::Top => Attribute::Top,
            YAttribute::Bottom => Attribute::Bottom,
            YAttribute::CenterY => Attribute::CenterY,
        }
    }
}

impl From<DimensionAttribute> for Attribute {
    fn from(attribute: DimensionAttribute) -> Self {
        match attribute {
            DimensionAttribute::Width => Attribute::Width,
            DimensionAttribute::Height => Attribute::Height,
        }
    }
}

/// An (item, attribute) pair: the solver-level identity of an anchor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnchorRef {
    pub item: LayoutItem,
    pub attribute: Attribute,
}

impl AnchorRef {
    pub fn new(item: LayoutItem, attribute: impl Into<Attribute>) -> Self {
        Self {
            item,
            attribute: attribute.into(),
        }
    }

    pub fn category(&self) -> AnchorCategory {
        self.attribute.category()
    }
}

impl fmt::Display for AnchorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.item, self.attribute.name())
    }
}

// ============================================================================
// Raw anchors
// ============================================================================

/// An undecorated anchor that maps directly onto an [`AnchorRef`]
pub trait RawAnchor: Anchor<Raw = Self> + Clone {
    fn anchor_ref(&self) -> AnchorRef;
}

macro_rules! raw_anchor {
    ($(#[$meta:meta])* $name:ident, $attribute:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            item: LayoutItem,
            attribute: $attribute,
        }

        impl $name {
            pub fn new(item: LayoutItem, attribute: $attribute) -> Self {
                Self { item, attribute }
            }

            pub fn item(&self) -> &LayoutItem {
                &self.item
            }

            pub fn attribute(&self) -> $attribute {
                self.attribute
            }
        }

        impl Anchor for $name {
            type Raw = $name;

            fn raw(&self) -> $name {
                self.clone()
            }
        }

        impl RawAnchor for $name {
            fn anchor_ref(&self) -> AnchorRef {
                AnchorRef::new(self.item.clone(), self.attribute)
            }
        }
    };
}

raw_anchor!(
    /// Horizontal position anchor (leading, trailing, center x)
    XAxisAnchor,
    XAttribute
);
raw_anchor!(
    /// Vertical position anchor (top, bottom, center y)
    YAxisAnchor,
    YAttribute
);
raw_anchor!(
    /// Size anchor (width, height)
    Dimension,
    DimensionAttribute
);

impl_anchor_ops!(XAxisAnchor, YAxisAnchor, Dimension);

// ============================================================================
// Accessors
// ============================================================================

/// Anchor accessors shared by views and layout guides
pub trait LayoutAnchors {
    fn layout_item(&self) -> LayoutItem;

    fn leading_anchor(&self) -> XAxisAnchor {
        XAxisAnchor::new(self.layout_item(), XAttribute::Leading)
    }

    fn trailing_anchor(&self) -> XAxisAnchor {
        XAxisAnchor::new(self.layout_item(), XAttribute::Trailing)
    }

    fn center_x_anchor(&self) -> XAxisAnchor {
        XAxisAnchor::new(self.layout_item(), XAttribute::CenterX)
    }

    fn top_anchor(&self) -> YAxisAnchor {
        YAxisAnchor::new(self.layout_item(), YAttribute::Top)
    }

    fn bottom_anchor(&self) -> YAxisAnchor {
        YAxisAnchor::new(self.layout_item(), YAttribute::Bottom)
    }

    fn center_y_anchor(&self) -> YAxisAnchor {
        YAxisAnchor::new(self.layout_item(), YAttribute::CenterY)
    }

    fn width_anchor(&self) -> Dimension {
        Dimension::new(self.layout_item(), DimensionAttribute::Width)
    }

    fn height_anchor(&self) -> Dimension {
        Dimension::new(self.layout_item(), DimensionAttribute::Height)
    }

    /// Leading and trailing paired with top and bottom
    fn edge_anchor(&self) -> CompositeAnchor {
        CompositeAnchor::new(
            vec![self.leading_anchor(), self.trailing_anchor()],
            vec![self.top_anchor(), self.bottom_anchor()],
        )
    }

    fn center_anchor(&self) -> CompositeAnchor {
        CompositeAnchor::new(vec![self.center_x_anchor()], vec![self.center_y_anchor()])
    }

    /// Width and height as a plain sequence
    fn size_anchor(&self) -> [Dimension; 2] {
        [self.width_anchor(), self.height_anchor()]
    }
}

impl LayoutAnchors for View {
    fn layout_item(&self) -> LayoutItem {
        LayoutItem::View(self.clone())
    }
}

impl LayoutAnchors for LayoutGuide {
    fn layout_item(&self) -> LayoutItem {
        LayoutItem::SafeAreaGuide(self.owner.clone())
    }
}
