//! Evaluation of layout scripts into views and constraints
//!
//! A script is evaluated in two passes: top-level `view` declarations are
//! collected first, so constraints may mention views declared further down,
//! then statements are turned into constraints through the same anchor
//! expressions and list builder Rust callers use.

pub mod error;

pub use error::ScriptError;

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::anchor::{Anchor, AnchorContainer};
use crate::builder::ConstraintListBuilder;
use crate::composite::{CompositeAnchor, SizeAnchors};
use crate::constraint::{Constraint, Relation, WithPriority};
use crate::item::{Dimension, LayoutAnchors, View, XAxisAnchor, YAxisAnchor};
use crate::layout::{ConstraintSolver, EdgeInsets, FrameProperty, LayoutConfig, LayoutEngine, Rect};
use crate::parser::ast::*;
use crate::relation::{AxisAnchor, DimensionAnchor};

const VIEW_PROPERTIES: &[&str] = &[
    "x",
    "y",
    "width",
    "height",
    "safe_top",
    "safe_left",
    "safe_bottom",
    "safe_right",
];

const ANCHORS: &[&str] = &[
    "leading", "trailing", "top", "bottom", "center_x", "center_y", "width", "height", "edges",
    "center", "size",
];

const SAFE_ONLY_ANCHORS: &[&str] = &["top_edges", "vertical_edges", "horizontal_edges"];

/// An anchor named by a script path
#[derive(Debug, Clone)]
enum AnchorValue {
    Horizontal(XAxisAnchor),
    Vertical(YAxisAnchor),
    Dimension(Dimension),
    Composite(CompositeAnchor),
    Size([Dimension; 2]),
}

impl AnchorValue {
    fn kind(&self) -> &'static str {
        match self {
            AnchorValue::Horizontal(_) => "horizontal",
            AnchorValue::Vertical(_) => "vertical",
            AnchorValue::Dimension(_) => "dimension",
            AnchorValue::Composite(_) => "composite",
            AnchorValue::Size(_) => "size",
        }
    }
}

/// Safe-area insets given on a view declaration; missing sides use the
/// configured default
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InsetOverrides {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub bottom: Option<f64>,
    pub right: Option<f64>,
}

impl InsetOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, base: EdgeInsets) -> EdgeInsets {
        EdgeInsets {
            top: self.top.unwrap_or(base.top),
            left: self.left.unwrap_or(base.left),
            bottom: self.bottom.unwrap_or(base.bottom),
            right: self.right.unwrap_or(base.right),
        }
    }
}

/// A declared view with the frame values and insets it was given
#[derive(Debug, Clone)]
pub struct ViewSpec {
    pub view: View,
    pub suggestions: Vec<(FrameProperty, f64)>,
    pub insets: InsetOverrides,
    span: Span,
}

/// Views and the flattened constraint list of an evaluated script
#[derive(Debug, Clone)]
pub struct Scene {
    views: Vec<ViewSpec>,
    constraints: Vec<Constraint>,
}

/// Frames and active constraints after solving a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedLayout {
    /// View names and frames in declaration order
    pub frames: Vec<(String, Rect)>,
    /// Active constraints, rendered
    pub constraints: Vec<String>,
}

impl SolvedLayout {
    pub fn frame(&self, name: &str) -> Option<Rect> {
        self.frames
            .iter()
            .find(|(view, _)| view == name)
            .map(|(_, frame)| *frame)
    }
}

impl Scene {
    /// Evaluate `script`; conditionals test membership of their flag in `flags`
    pub fn evaluate(script: &Script, flags: &HashSet<String>) -> Result<Self, ScriptError> {
        let views = collect_views(script)?;
        let evaluator = Evaluator {
            views: views
                .iter()
                .map(|spec| (spec.view.name().to_string(), spec.view.clone()))
                .collect(),
            flags,
        };
        let constraints = evaluator.block(&script.statements)?;
        debug!(
            views = views.len(),
            constraints = constraints.len(),
            "evaluated script"
        );
        Ok(Self { views, constraints })
    }

    pub fn views(&self) -> &[ViewSpec] {
        &self.views
    }

    pub fn view(&self, name: &str) -> Option<&View> {
        self.views
            .iter()
            .map(|spec| &spec.view)
            .find(|view| view.name() == name)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Suggest declared frames and insets, activate every constraint as one
    /// batch, and read back the frames
    pub fn solve(&self, config: &LayoutConfig) -> Result<SolvedLayout, ScriptError> {
        let mut solver = ConstraintSolver::with_config(config.clone());
        for spec in &self.views {
            for &(property, value) in &spec.suggestions {
                solver.suggest_value(&spec.view, property, value)?;
            }
            if !spec.insets.is_empty() {
                solver.set_safe_area_insets(&spec.view, spec.insets.apply(config.safe_area_insets))?;
            }
        }
        solver.activate(&self.constraints)?;

        Ok(SolvedLayout {
            frames: self
                .views
                .iter()
                .map(|spec| (spec.view.name().to_string(), solver.frame(&spec.view)))
                .collect(),
            constraints: solver.active_constraints().map(|c| c.to_string()).collect(),
        })
    }
}

/// First pass: top-level view declarations
fn collect_views(script: &Script) -> Result<Vec<ViewSpec>, ScriptError> {
    let mut views: Vec<ViewSpec> = Vec::new();
    for stmt in &script.statements {
        let Statement::View(decl) = &stmt.node else {
            continue;
        };
        let name = decl.name.node.as_str();
        if let Some(first) = views.iter().find(|spec| spec.view.name() == name) {
            return Err(ScriptError::DuplicateView {
                name: name.to_string(),
                span: decl.name.span.clone(),
                first: first.span.clone(),
            });
        }
        views.push(view_spec(decl)?);
    }
    Ok(views)
}

fn view_spec(decl: &ViewDecl) -> Result<ViewSpec, ScriptError> {
    let mut spec = ViewSpec {
        view: View::new(decl.name.node.as_str()),
        suggestions: Vec::new(),
        insets: InsetOverrides::default(),
        span: decl.name.span.clone(),
    };
    for property in &decl.properties {
        let value = property.node.value.node;
        let key = &property.node.key;
        match key.node.as_str() {
            "x" => spec.suggestions.push((FrameProperty::X, value)),
            "y" => spec.suggestions.push((FrameProperty::Y, value)),
            "width" => spec.suggestions.push((FrameProperty::Width, value)),
            "height" => spec.suggestions.push((FrameProperty::Height, value)),
            "safe_top" => spec.insets.top = Some(value),
            "safe_left" => spec.insets.left = Some(value),
            "safe_bottom" => spec.insets.bottom = Some(value),
            "safe_right" => spec.insets.right = Some(value),
            other => {
                return Err(ScriptError::UnknownProperty {
                    name: other.to_string(),
                    span: key.span.clone(),
                    valid: VIEW_PROPERTIES.join(", "),
                    suggestions: find_similar(VIEW_PROPERTIES.iter().copied(), other, 2),
                })
            }
        }
    }
    Ok(spec)
}

/// Second pass: statements to constraints
struct Evaluator<'a> {
    views: HashMap<String, View>,
    flags: &'a HashSet<String>,
}

impl Evaluator<'_> {
    fn block(&self, statements: &[Spanned<Statement>]) -> Result<Vec<Constraint>, ScriptError> {
        let mut builder = ConstraintListBuilder::new();
        for stmt in statements {
            match &stmt.node {
                Statement::View(_) => {}
                Statement::Constraint(decl) => {
                    builder.add(self.constraint(decl)?);
                }
                Statement::Conditional(cond) => {
                    // Both branches are evaluated so errors surface regardless of flags
                    let then = self.nested_block(&cond.then_branch)?;
                    let otherwise = self.nested_block(&cond.else_branch)?;
                    let condition = self.flags.contains(cond.flag.node.as_str()) != cond.negated;
                    trace!(flag = %cond.flag.node, condition, "conditional");
                    builder.add_if(condition, then, otherwise);
                }
            }
        }
        Ok(builder.build())
    }

    fn nested_block(&self, statements: &[Spanned<Statement>]) -> Result<Vec<Constraint>, ScriptError> {
        if let Some(decl) = statements.iter().find_map(|s| match &s.node {
            Statement::View(decl) => Some(decl),
            _ => None,
        }) {
            return Err(ScriptError::NestedView {
                name: decl.name.node.to_string(),
                span: decl.name.span.clone(),
            });
        }
        self.block(statements)
    }

    fn view(&self, name: &Spanned<Identifier>) -> Result<&View, ScriptError> {
        self.views
            .get(name.node.as_str())
            .ok_or_else(|| ScriptError::UndefinedView {
                name: name.node.to_string(),
                span: name.span.clone(),
                suggestions: find_similar(
                    self.views.keys().map(String::as_str),
                    name.node.as_str(),
                    2,
                ),
            })
    }

    fn resolve(&self, path: &AnchorPath) -> Result<AnchorValue, ScriptError> {
        let view = self.view(&path.view)?;
        let attribute = path.attribute.node.as_str();

        let value = if path.safe {
            let guide = view.safe_area_layout_guide();
            let safe = view.safe_area();
            match attribute {
                "top_edges" => Some(AnchorValue::Composite(safe.top_edge_anchor())),
                "vertical_edges" => Some(AnchorValue::Composite(safe.vertical_edge_anchor())),
                "horizontal_edges" => Some(AnchorValue::Composite(safe.horizontal_edge_anchor())),
                "edges" => Some(AnchorValue::Composite(safe.edge_anchor())),
                _ => anchor_of(&guide, attribute),
            }
        } else {
            anchor_of(view, attribute)
        };

        value.ok_or_else(|| {
            let mut valid: Vec<&str> = ANCHORS.to_vec();
            if path.safe {
                valid.extend_from_slice(SAFE_ONLY_ANCHORS);
            }
            ScriptError::UnknownAnchor {
                name: attribute.to_string(),
                span: path.attribute.span.clone(),
                valid: valid.join(", "),
                suggestions: find_similar(valid.iter().copied(), attribute, 2),
            }
        })
    }

    fn constraint(&self, decl: &ConstraintDecl) -> Result<Vec<Constraint>, ScriptError> {
        let subject = self.resolve(&decl.subject.node)?;
        let relation = decl.relation.node;
        let operand_span = decl.operand.span.clone();

        let mismatch = |operand: &'static str| ScriptError::CategoryMismatch {
            subject: subject.kind(),
            operand,
            span: operand_span.clone(),
        };
        let equality_only = || -> Result<(), ScriptError> {
            if relation == Relation::Equal {
                Ok(())
            } else {
                Err(ScriptError::UnsupportedRelation {
                    subject: subject.kind(),
                    relation,
                    span: decl.relation.span.clone(),
                })
            }
        };

        let constraints = match &decl.operand.node {
            Operand::Anchor(expr) => {
                let target = self.resolve(&expr.path.node)?;
                let modifiers = &expr.modifiers;
                match (&subject, target) {
                    (AnchorValue::Horizontal(a), AnchorValue::Horizontal(b)) => {
                        unscaled(subject.kind(), modifiers)?;
                        vec![relate_axis(a, relation, modified(&b, modifiers)?)]
                    }
                    (AnchorValue::Vertical(a), AnchorValue::Vertical(b)) => {
                        unscaled(subject.kind(), modifiers)?;
                        vec![relate_axis(a, relation, modified(&b, modifiers)?)]
                    }
                    (AnchorValue::Dimension(a), AnchorValue::Dimension(b)) => {
                        vec![relate_dimension(a, relation, modified(&b, modifiers)?)]
                    }
                    (AnchorValue::Composite(a), AnchorValue::Composite(b)) => {
                        equality_only()?;
                        unscaled(subject.kind(), modifiers)?;
                        a.equal_to(modified(&b, modifiers)?)
                    }
                    (AnchorValue::Size(a), AnchorValue::Size(b)) => {
                        equality_only()?;
                        let targets = b
                            .iter()
                            .map(|d| modified(d, modifiers))
                            .collect::<Result<Vec<_>, _>>()?;
                        SizeAnchors::equal_to(&a[..], targets)
                    }
                    (_, target) => return Err(mismatch(target.kind())),
                }
            }
            Operand::Constant(value) => match &subject {
                AnchorValue::Dimension(a) => vec![relate_constant(a, relation, *value)],
                AnchorValue::Horizontal(_) | AnchorValue::Vertical(_) => {
                    return Err(ScriptError::MissingTarget {
                        path: decl.subject.node.to_string(),
                        span: operand_span.clone(),
                    })
                }
                _ => return Err(mismatch("constant")),
            },
            Operand::Sizes(values) => match &subject {
                AnchorValue::Size(a) => {
                    equality_only()?;
                    let values: Vec<f64> = values.iter().map(|v| v.node).collect();
                    a[..].equal_to_constants(&values)
                }
                _ => return Err(mismatch("size list")),
            },
        };

        trace!(subject = %decl.subject.node, count = constraints.len(), "built constraints");
        Ok(match &decl.priority {
            Some(priority) => constraints.with_priority(priority.node),
            None => constraints,
        })
    }
}

fn anchor_of(item: &impl LayoutAnchors, attribute: &str) -> Option<AnchorValue> {
    Some(match attribute {
        "leading" => AnchorValue::Horizontal(item.leading_anchor()),
        "trailing" => AnchorValue::Horizontal(item.trailing_anchor()),
        "center_x" => AnchorValue::Horizontal(item.center_x_anchor()),
        "top" => AnchorValue::Vertical(item.top_anchor()),
        "bottom" => AnchorValue::Vertical(item.bottom_anchor()),
        "center_y" => AnchorValue::Vertical(item.center_y_anchor()),
        "width" => AnchorValue::Dimension(item.width_anchor()),
        "height" => AnchorValue::Dimension(item.height_anchor()),
        "edges" => AnchorValue::Composite(item.edge_anchor()),
        "center" => AnchorValue::Composite(item.center_anchor()),
        "size" => AnchorValue::Size(item.size_anchor()),
        _ => return None,
    })
}

/// Positions have no multiplier to override
fn unscaled(subject: &'static str, modifiers: &[Spanned<Modifier>]) -> Result<(), ScriptError> {
    match modifiers
        .iter()
        .find(|m| matches!(m.node, Modifier::Scale(_) | Modifier::Divide(_)))
    {
        Some(modifier) => Err(ScriptError::UnsupportedModifier {
            subject,
            span: modifier.span.clone(),
        }),
        None => Ok(()),
    }
}

/// Apply script modifiers left to right, each overriding one field
fn modified<A>(
    anchor: &A,
    modifiers: &[Spanned<Modifier>],
) -> Result<AnchorContainer<A::Raw>, ScriptError>
where
    A: Anchor,
    A::Raw: Clone,
{
    let mut container = AnchorContainer::wrap(anchor);
    for modifier in modifiers {
        let result = match modifier.node {
            Modifier::Offset(k) => Ok(container.offset(k)),
            Modifier::Inset(k) => Ok(container.inset(k)),
            Modifier::Scale(k) => container.try_scaled(k),
            Modifier::Divide(k) => container.try_divided(k),
        };
        container = result.map_err(|source| ScriptError::Anchor {
            source,
            span: modifier.span.clone(),
        })?;
    }
    Ok(container)
}

fn relate_axis<S>(anchor: &S, relation: Relation, other: AnchorContainer<S>) -> Constraint
where
    S: AxisAnchor + Clone,
{
    match relation {
        Relation::Equal => AxisAnchor::equal_to(anchor, other),
        Relation::GreaterThanOrEqual => anchor.greater_than_or_equal_to(other),
        Relation::LessThanOrEqual => anchor.less_than_or_equal_to(other),
    }
}

fn relate_dimension(
    anchor: &Dimension,
    relation: Relation,
    other: AnchorContainer<Dimension>,
) -> Constraint {
    match relation {
        Relation::Equal => DimensionAnchor::equal_to(anchor, other),
        Relation::GreaterThanOrEqual => anchor.greater_than_or_equal_to(other),
        Relation::LessThanOrEqual => anchor.less_than_or_equal_to(other),
    }
}

fn relate_constant(anchor: &Dimension, relation: Relation, constant: f64) -> Constraint {
    match relation {
        Relation::Equal => anchor.equal_to_constant(constant),
        Relation::GreaterThanOrEqual => anchor.greater_than_or_equal_to_constant(constant),
        Relation::LessThanOrEqual => anchor.less_than_or_equal_to_constant(constant),
    }
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];
    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Find similar names within a maximum edit distance, closest first
fn find_similar<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut matches: Vec<(&str, usize)> = candidates
        .into_iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            // Abbreviations ("lead", "cent") match by prefix
            let close = dist <= max_distance || (target.len() >= 3 && name.starts_with(target));
            (close && dist > 0).then_some((name, dist))
        })
        .collect();

    matches.sort_by(|(a, da), (b, db)| da.cmp(db).then(a.cmp(b)));
    matches
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn evaluate(source: &str, flags: &[&str]) -> Result<Scene, ScriptError> {
        let script = parse(source)?;
        let flags: HashSet<String> = flags.iter().map(|f| f.to_string()).collect();
        Scene::evaluate(&script, &flags)
    }

    fn rendered(scene: &Scene) -> Vec<String> {
        scene.constraints().iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("hello", "hello"), 0);
        assert_eq!(levenshtein_distance("server", "servr"), 1);
        assert_eq!(levenshtein_distance("cat", "dog"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }

    #[test]
    fn test_find_similar() {
        let suggestions = find_similar(["server", "client", "servers"], "servr", 2);
        assert_eq!(suggestions, vec!["server".to_string(), "servers".to_string()]);
    }

    #[test]
    fn test_find_similar_matches_prefixes() {
        let suggestions = find_similar(["leading", "trailing", "top"], "lead", 2);
        assert_eq!(suggestions, vec!["leading".to_string()]);

        // Too short to stand for an abbreviation
        assert!(find_similar(["leading"], "le", 2).is_empty());
    }

    #[test]
    fn test_constraints_in_declaration_order() {
        let scene = evaluate(
            r#"
            card.top ≈ root.top + 8
            view root
            view card
            card.width ≥ root.width * 0.5 - 4 • 750
            card.height ≤ 44
            "#,
            &[],
        )
        .unwrap();

        assert_eq!(
            rendered(&scene),
            vec![
                "card.top == root.top + 8",
                "card.width >= root.width * 0.5 - 4 @750",
                "card.height <= 44",
            ]
        );
        assert_eq!(scene.views().len(), 2);
        assert!(scene.view("card").is_some());
    }

    #[test]
    fn test_composites_expand_in_pair_order() {
        let scene = evaluate(
            "view a view b\na.edges ≈ b.safe.edges + 16\na.center ≈ b.center",
            &[],
        )
        .unwrap();
        assert_eq!(
            rendered(&scene),
            vec![
                "a.leading == b.safe.leading + 16",
                "a.trailing == b.safe.trailing + 16",
                "a.top == b.safe.top + 16",
                "a.bottom == b.safe.bottom + 16",
                "a.center_x == b.center_x",
                "a.center_y == b.center_y",
            ]
        );
    }

    #[test]
    fn test_safe_area_variants() {
        let scene = evaluate("view a view b\na.edges ≈ b.safe.top_edges", &[]).unwrap();
        assert_eq!(
            rendered(&scene),
            vec![
                "a.leading == b.leading",
                "a.trailing == b.trailing",
                "a.top == b.safe.top",
                "a.bottom == b.bottom",
            ]
        );
    }

    #[test]
    fn test_size_forms() {
        let scene = evaluate(
            "view a view b\na.size ≈ [44, 32]\na.size ≈ b.size * 2 @ low",
            &[],
        )
        .unwrap();
        assert_eq!(
            rendered(&scene),
            vec![
                "a.width == 44",
                "a.height == 32",
                "a.width == b.width * 2 @250",
                "a.height == b.height * 2 @250",
            ]
        );
    }

    #[test]
    fn test_conditional_picks_one_branch() {
        let source = r#"
            view a
            a.height ≈ 10
            if compact { a.width ≤ 320 } else { a.width ≥ 600 }
            a.height ≥ 5
        "#;

        let compact = evaluate(source, &["compact"]).unwrap();
        assert_eq!(
            rendered(&compact),
            vec!["a.height == 10", "a.width <= 320", "a.height >= 5"]
        );

        let regular = evaluate(source, &[]).unwrap();
        assert_eq!(
            rendered(&regular),
            vec!["a.height == 10", "a.width >= 600", "a.height >= 5"]
        );
    }

    #[test]
    fn test_negated_conditional_without_else() {
        let source = "view a\nif !wide { a.width ≤ 320 }";
        assert_eq!(rendered(&evaluate(source, &[]).unwrap()), vec!["a.width <= 320"]);
        assert!(evaluate(source, &["wide"]).unwrap().constraints().is_empty());
    }

    #[test]
    fn test_undefined_view_suggests() {
        let err = evaluate("view card\ncard.top ≈ crad.top", &[]).unwrap_err();
        match err {
            ScriptError::UndefinedView {
                name, suggestions, ..
            } => {
                assert_eq!(name, "crad");
                assert_eq!(suggestions, vec!["card".to_string()]);
            }
            other => panic!("Expected UndefinedView, got {:?}", other),
        }
    }

    #[test]
    fn test_untaken_branch_is_still_checked() {
        let err = evaluate("view a\nif never { a.top ≈ b.top }", &[]).unwrap_err();
        assert!(matches!(err, ScriptError::UndefinedView { .. }));
    }

    #[test]
    fn test_unknown_anchor() {
        let err = evaluate("view a\na.lead ≈ a.trailing", &[]).unwrap_err();
        match err {
            ScriptError::UnknownAnchor { suggestions, .. } => {
                assert!(suggestions.contains(&"leading".to_string()));
            }
            other => panic!("Expected UnknownAnchor, got {:?}", other),
        }

        let err = evaluate("view a\na.edges ≈ a.top_edges", &[]).unwrap_err();
        assert!(matches!(err, ScriptError::UnknownAnchor { .. }));
    }

    #[test]
    fn test_category_mismatch_is_rejected() {
        let err = evaluate("view a view b\na.leading ≈ b.top", &[]).unwrap_err();
        match err {
            ScriptError::CategoryMismatch {
                subject, operand, ..
            } => {
                assert_eq!(subject, "horizontal");
                assert_eq!(operand, "vertical");
            }
            other => panic!("Expected CategoryMismatch, got {:?}", other),
        }

        let err = evaluate("view a\na.width ≈ a.size", &[]).unwrap_err();
        assert!(matches!(err, ScriptError::CategoryMismatch { .. }));
    }

    #[test]
    fn test_position_needs_target() {
        let err = evaluate("view a\na.top ≈ 20", &[]).unwrap_err();
        assert!(matches!(err, ScriptError::MissingTarget { .. }));
    }

    #[test]
    fn test_composite_inequality_is_rejected() {
        let err = evaluate("view a view b\na.edges ≥ b.edges", &[]).unwrap_err();
        assert!(matches!(err, ScriptError::UnsupportedRelation { .. }));
    }

    #[test]
    fn test_degenerate_multiplier() {
        let err = evaluate("view a view b\na.width ≈ b.width / 0", &[]).unwrap_err();
        match err {
            ScriptError::Anchor { source, span } => {
                assert!(matches!(
                    source,
                    crate::anchor::AnchorError::DegenerateMultiplier(_)
                ));
                assert_eq!(span, 34..37);
            }
            other => panic!("Expected Anchor error, got {:?}", other),
        }
    }

    #[test]
    fn test_position_anchors_reject_multipliers() {
        let err = evaluate("view a view b\na.top ≈ b.bottom * 3", &[]).unwrap_err();
        match err {
            ScriptError::UnsupportedModifier { subject, span } => {
                assert_eq!(subject, "vertical");
                assert_eq!(span, 33..36);
            }
            other => panic!("Expected UnsupportedModifier, got {:?}", other),
        }

        let err = evaluate("view a view b\na.edges ≈ b.edges + 4 / 2", &[]).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::UnsupportedModifier { subject: "composite", .. }
        ));

        // Offsets still apply to positions, multipliers to dimensions
        let scene = evaluate(
            "view a view b\na.leading ≈ b.trailing + 8 - 2\na.width ≈ b.width / 2",
            &[],
        )
        .unwrap();
        assert_eq!(
            rendered(&scene),
            vec!["a.leading == b.trailing - 2", "a.width == b.width * 0.5"]
        );
    }

    #[test]
    fn test_view_declaration_errors() {
        assert!(matches!(
            evaluate("view a\nview a", &[]).unwrap_err(),
            ScriptError::DuplicateView { .. }
        ));
        assert!(matches!(
            evaluate("if f { view a }", &[]).unwrap_err(),
            ScriptError::NestedView { .. }
        ));
        assert!(matches!(
            evaluate("view a [depth: 3]", &[]).unwrap_err(),
            ScriptError::UnknownProperty { .. }
        ));
    }

    #[test]
    fn test_inset_overrides() {
        let overrides = InsetOverrides {
            top: Some(44.0),
            ..InsetOverrides::default()
        };
        assert!(!overrides.is_empty());
        assert_eq!(
            overrides.apply(EdgeInsets::new(20.0, 8.0, 0.0, 8.0)),
            EdgeInsets::new(44.0, 8.0, 0.0, 8.0)
        );
    }

    #[test]
    fn test_solve_scene() {
        let scene = evaluate(
            r#"
            view root [x: 0, y: 0, width: 375, height: 812, safe_top: 44, safe_bottom: 34]
            view card
            card.leading ≈ root.safe.leading + 16
            card.trailing ≈ root.safe.trailing - 16
            card.top ≈ root.safe.top + 8
            card.height ≈ 200
            "#,
            &[],
        )
        .unwrap();

        let solved = scene.solve(&LayoutConfig::default()).unwrap();
        let card = solved.frame("card").unwrap();
        assert!(card.approx_eq(&Rect::new(16.0, 52.0, 343.0, 200.0)), "{}", card);
        assert_eq!(solved.constraints.len(), 4);
    }
}
