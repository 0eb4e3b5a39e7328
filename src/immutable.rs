//! Structural immutability checks.
//!
//! Resource types describe themselves as a tree of [`Node`]s through the
//! [`Walk`] trait, with each record field carrying an [`Annotation`].
//! [`validate`] walks the new and current trees side by side and reports
//! the path of the first field that changed when it must not.
//!
//! Path grammar:
//! - record fields are joined with `.` using their serialized key
//! - list elements are `[i]`, or `['name']` when the element is a record
//!   with a `name` field
//! - map entries are `["key"]`

use std::borrow::Cow;
use std::collections::BTreeMap;

use thiserror::Error;

/// How a field may change between the current and the new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mutability {
    /// Any change is a violation.
    #[default]
    Immutable,
    /// Changes are allowed; the field is not inspected.
    Mutable,
    /// Only case changes are allowed, for this field and everything below it.
    CaseInsensitive,
}

/// Per-field metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Annotation {
    pub mutability: Mutability,
    /// Output-only field. Callers may omit it; if they send it, it must be
    /// unchanged.
    pub read_only: bool,
}

impl Annotation {
    pub const IMMUTABLE: Annotation = Annotation {
        mutability: Mutability::Immutable,
        read_only: false,
    };
    pub const MUTABLE: Annotation = Annotation {
        mutability: Mutability::Mutable,
        read_only: false,
    };
    pub const CASE_INSENSITIVE: Annotation = Annotation {
        mutability: Mutability::CaseInsensitive,
        read_only: false,
    };
    pub const READ_ONLY: Annotation = Annotation {
        mutability: Mutability::Immutable,
        read_only: true,
    };
}

/// One field of a record.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    pub key: &'static str,
    pub annotation: Annotation,
    pub node: Node<'a>,
}

impl<'a> Field<'a> {
    pub fn new(key: &'static str, value: &'a impl Walk) -> Self {
        Self::annotated(key, Annotation::IMMUTABLE, value)
    }

    pub fn annotated(key: &'static str, annotation: Annotation, value: &'a impl Walk) -> Self {
        Self {
            key,
            annotation,
            node: value.walk(),
        }
    }
}

/// Borrowed structural view of a value.
#[derive(Debug, Clone)]
pub enum Node<'a> {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Cow<'a, str>),
    /// Present or absent value; adds no path segment.
    Optional(Option<Box<Node<'a>>>),
    Seq(Vec<Node<'a>>),
    Map(BTreeMap<&'a str, Node<'a>>),
    Record(Vec<Field<'a>>),
}

impl Node<'_> {
    /// Whether this is the zero value for its kind.
    pub fn is_zero(&self) -> bool {
        match self {
            Node::Bool(b) => !b,
            Node::Int(i) => *i == 0,
            Node::Float(f) => *f == 0.0,
            Node::Str(s) => s.is_empty(),
            Node::Optional(o) => o.is_none(),
            Node::Seq(items) => items.is_empty(),
            Node::Map(entries) => entries.is_empty(),
            Node::Record(fields) => fields.iter().all(|f| f.node.is_zero()),
        }
    }

    /// Value of a `name` string field, if this is a record that has one.
    fn record_name(&self) -> Option<&str> {
        let Node::Record(fields) = self else {
            return None;
        };
        fields.iter().find_map(|f| match (&f.key, &f.node) {
            (&"name", Node::Str(s)) => Some(s.as_ref()),
            _ => None,
        })
    }

    fn kind(&self) -> &'static str {
        match self {
            Node::Bool(_) => "bool",
            Node::Int(_) => "int",
            Node::Float(_) => "float",
            Node::Str(_) => "string",
            Node::Optional(_) => "optional",
            Node::Seq(_) => "sequence",
            Node::Map(_) => "map",
            Node::Record(_) => "record",
        }
    }

    /// Deep equality, honouring case-insensitivity for strings.
    fn same(&self, other: &Node<'_>, ignore_case: bool) -> bool {
        compare("", self, other, ignore_case).is_none()
    }
}

/// Types whose fields can be checked for immutability.
pub trait Walk {
    fn walk(&self) -> Node<'_>;
}

/// A protected field differs between the new and current value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{target}: {message}")]
pub struct ImmutableError {
    pub target: String,
    pub message: String,
}

impl ImmutableError {
    fn at(target: String) -> Self {
        let message = format!("Changing property '{target}' is not allowed.");
        Self { target, message }
    }
}

/// Case-insensitive string equality, rune by rune under simple case folding.
///
/// Shared by every case-insensitive comparison in the crate so that an
/// identity field folds the same way in the static rules and in the diff.
pub fn equal_fold(a: &str, b: &str) -> bool {
    let mut a = a.chars();
    let mut b = b.chars();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if chars_fold(x, y) => {}
            _ => return false,
        }
    }
}

fn chars_fold(x: char, y: char) -> bool {
    x == y || x.to_lowercase().eq(y.to_lowercase()) || x.to_uppercase().eq(y.to_uppercase())
}

/// Compare `new` against `current`, reporting the first protected change.
///
/// # Panics
///
/// Panics if the two values produce differently shaped trees. That can only
/// happen when a [`Walk`] implementation is inconsistent, which is a bug in
/// the type model rather than bad input.
pub fn validate<T: Walk + ?Sized>(path: &str, new: &T, current: &T) -> Result<(), ImmutableError> {
    match compare(path, &new.walk(), &current.walk(), false) {
        Some(target) => Err(ImmutableError::at(target)),
        None => Ok(()),
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn element_path(path: &str, index: usize, node: &Node<'_>) -> String {
    match node.record_name() {
        Some(name) => format!("{path}['{name}']"),
        None => format!("{path}[{index}]"),
    }
}

#[allow(clippy::panic)]
fn compare(path: &str, new: &Node<'_>, current: &Node<'_>, ignore_case: bool) -> Option<String> {
    let differs = || path.to_string();

    match (new, current) {
        (Node::Bool(a), Node::Bool(b)) => (a != b).then(differs),
        (Node::Int(a), Node::Int(b)) => (a != b).then(differs),
        (Node::Float(a), Node::Float(b)) => (a != b).then(differs),
        (Node::Str(a), Node::Str(b)) => {
            let equal = if ignore_case { equal_fold(a, b) } else { a == b };
            (!equal).then(differs)
        }
        (Node::Optional(a), Node::Optional(b)) => match (a, b) {
            (None, None) => None,
            (Some(a), Some(b)) => compare(path, a, b, ignore_case),
            _ => Some(differs()),
        },
        (Node::Seq(a), Node::Seq(b)) => {
            if a.len() != b.len() {
                return Some(differs());
            }
            a.iter().zip(b).enumerate().find_map(|(i, (x, y))| {
                compare(&element_path(path, i, x), x, y, ignore_case)
            })
        }
        (Node::Map(a), Node::Map(b)) => {
            if a.len() != b.len() {
                return Some(differs());
            }
            a.iter().find_map(|(key, x)| {
                let entry = format!("{path}[{key:?}]");
                match b.get(key) {
                    Some(y) => compare(&entry, x, y, ignore_case),
                    None => Some(entry),
                }
            })
        }
        (Node::Record(a), Node::Record(b)) => {
            if a.len() != b.len() {
                panic!(
                    "record at '{path}' has {} fields on one side and {} on the other",
                    a.len(),
                    b.len()
                );
            }
            a.iter()
                .zip(b)
                .find_map(|(x, y)| compare_field(path, x, y, ignore_case))
        }
        (a, b) => panic!(
            "cannot compare {} with {} at '{path}': inconsistent Walk implementation",
            a.kind(),
            b.kind()
        ),
    }
}

/// Compare one record field under its annotation.
///
/// A read-only field passes when the new value leaves it at zero, and also
/// when it is non-zero but identical to the current value. The stricter
/// reading, zero no matter what, would reject a stored resource resubmitted
/// unchanged, since it carries output-only values such as `systemData`.
/// Any other non-zero value is reported at the field itself. On create there
/// is no current value to diff against, so output-only fields callers can
/// set are rejected by the static rules instead.
#[allow(clippy::panic)]
fn compare_field(
    path: &str,
    new: &Field<'_>,
    current: &Field<'_>,
    ignore_case: bool,
) -> Option<String> {
    if new.key != current.key {
        panic!("field '{}' paired with '{}' under '{path}'", new.key, current.key);
    }

    let annotation = new.annotation;
    if annotation.mutability == Mutability::Mutable {
        return None;
    }

    let field_path = join(path, new.key);
    let ignore_case = ignore_case || annotation.mutability == Mutability::CaseInsensitive;

    if annotation.read_only {
        if new.node.is_zero() || new.node.same(&current.node, ignore_case) {
            return None;
        }
        return Some(field_path);
    }

    compare(&field_path, &new.node, &current.node, ignore_case)
}

impl Walk for bool {
    fn walk(&self) -> Node<'_> {
        Node::Bool(*self)
    }
}

macro_rules! walk_int {
    ($($t:ty),*) => {
        $(impl Walk for $t {
            fn walk(&self) -> Node<'_> {
                Node::Int(i64::from(*self))
            }
        })*
    };
}

walk_int!(i8, i16, i32, i64, u8, u16, u32);

impl Walk for f64 {
    fn walk(&self) -> Node<'_> {
        Node::Float(*self)
    }
}

impl Walk for String {
    fn walk(&self) -> Node<'_> {
        Node::Str(Cow::Borrowed(self))
    }
}

impl Walk for str {
    fn walk(&self) -> Node<'_> {
        Node::Str(Cow::Borrowed(self))
    }
}

impl Walk for jiff::Timestamp {
    fn walk(&self) -> Node<'_> {
        Node::Str(Cow::Owned(self.to_string()))
    }
}

impl<T: Walk> Walk for Option<T> {
    fn walk(&self) -> Node<'_> {
        Node::Optional(self.as_ref().map(|v| Box::new(v.walk())))
    }
}

impl<T: Walk> Walk for Box<T> {
    fn walk(&self) -> Node<'_> {
        self.as_ref().walk()
    }
}

impl<T: Walk> Walk for Vec<T> {
    fn walk(&self) -> Node<'_> {
        Node::Seq(self.iter().map(Walk::walk).collect())
    }
}

impl<T: Walk> Walk for BTreeMap<String, T> {
    fn walk(&self) -> Node<'_> {
        Node::Map(self.iter().map(|(k, v)| (k.as_str(), v.walk())).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Inner {
        name: String,
        size: i32,
        label: String,
    }

    impl Walk for Inner {
        fn walk(&self) -> Node<'_> {
            Node::Record(vec![
                Field::new("name", &self.name),
                Field::new("size", &self.size),
                Field::annotated("label", Annotation::MUTABLE, &self.label),
            ])
        }
    }

    #[derive(Clone, Default)]
    struct Unnamed {
        value: String,
    }

    impl Walk for Unnamed {
        fn walk(&self) -> Node<'_> {
            Node::Record(vec![Field::new("value", &self.value)])
        }
    }

    #[derive(Clone, Default)]
    struct Outer {
        id: String,
        region: String,
        tags: BTreeMap<String, String>,
        labels: BTreeMap<String, String>,
        inner: Option<Inner>,
        items: Option<Vec<Inner>>,
        plain: Vec<Unnamed>,
        output: Option<Inner>,
        enabled: bool,
        ratio: f64,
    }

    impl Walk for Outer {
        fn walk(&self) -> Node<'_> {
            Node::Record(vec![
                Field::annotated("id", Annotation::CASE_INSENSITIVE, &self.id),
                Field::new("region", &self.region),
                Field::annotated("tags", Annotation::MUTABLE, &self.tags),
                Field::new("labels", &self.labels),
                Field::new("inner", &self.inner),
                Field::new("items", &self.items),
                Field::new("plain", &self.plain),
                Field::annotated("output", Annotation::READ_ONLY, &self.output),
                Field::new("enabled", &self.enabled),
                Field::new("ratio", &self.ratio),
            ])
        }
    }

    fn inner(name: &str) -> Inner {
        Inner {
            name: name.to_string(),
            size: 3,
            label: "l".to_string(),
        }
    }

    fn outer() -> Outer {
        Outer {
            id: "/Subscriptions/Abc".to_string(),
            region: "eastus".to_string(),
            tags: BTreeMap::from([("k".to_string(), "v".to_string())]),
            labels: BTreeMap::from([("team".to_string(), "infra".to_string())]),
            inner: Some(inner("one")),
            items: Some(vec![inner("worker")]),
            plain: vec![Unnamed {
                value: "x".to_string(),
            }],
            output: Some(inner("out")),
            enabled: true,
            ratio: 0.5,
        }
    }

    fn target(new: &Outer, current: &Outer) -> Option<String> {
        validate("", new, current).err().map(|e| e.target)
    }

    #[test]
    fn test_identical_values_pass() {
        assert!(validate("", &outer(), &outer()).is_ok());
        assert!(validate("", &Outer::default(), &Outer::default()).is_ok());
    }

    #[test]
    fn test_case_insensitive_field() {
        let mut new = outer();
        new.id = new.id.to_uppercase();
        assert_eq!(target(&new, &outer()), None);

        new.id = "/subscriptions/other".to_string();
        assert_eq!(target(&new, &outer()).as_deref(), Some("id"));
    }

    #[test]
    fn test_case_sensitive_by_default() {
        let mut new = outer();
        new.region = "EastUS".to_string();
        let err = validate("", &new, &outer()).unwrap_err();
        assert_eq!(err.target, "region");
        assert_eq!(err.message, "Changing property 'region' is not allowed.");
    }

    #[test]
    fn test_equal_fold() {
        assert!(equal_fold("resourceName", "RESOURCENAME"));
        assert!(equal_fold("re\u{17f}ourcename", "resourcename"));
        assert!(equal_fold("\u{212a}ind", "kind"));
        assert!(!equal_fold("resourceName", "resourceNames"));
        assert!(!equal_fold("stra\u{df}e", "strasse"));
    }

    #[test]
    fn test_case_insensitive_field_folds_unicode() {
        let mut new = outer();
        new.id = new.id.replace('s', "\u{17f}");
        assert_eq!(target(&new, &outer()), None);
    }

    #[test]
    fn test_mutable_fields_skipped() {
        let mut new = outer();
        new.tags.insert("another".to_string(), "tag".to_string());
        new.inner.as_mut().unwrap().label = "changed".to_string();
        assert_eq!(target(&new, &outer()), None);
    }

    #[test]
    fn test_map_paths() {
        let mut new = outer();
        new.labels.insert("team".to_string(), "apps".to_string());
        assert_eq!(target(&new, &outer()).as_deref(), Some(r#"labels["team"]"#));

        let mut renamed = outer();
        renamed.labels = BTreeMap::from([("owner".to_string(), "infra".to_string())]);
        assert_eq!(target(&renamed, &outer()).as_deref(), Some(r#"labels["owner"]"#));

        let mut grown = outer();
        grown.labels.insert("x".to_string(), "y".to_string());
        assert_eq!(target(&grown, &outer()).as_deref(), Some("labels"));
    }

    #[test]
    fn test_named_element_path() {
        let mut new = outer();
        new.items.as_mut().unwrap()[0].size = 4;
        assert_eq!(target(&new, &outer()).as_deref(), Some("items['worker'].size"));

        let mut renamed = outer();
        renamed.items.as_mut().unwrap()[0].name = "new-name".to_string();
        assert_eq!(target(&renamed, &outer()).as_deref(), Some("items['new-name'].name"));
    }

    #[test]
    fn test_indexed_element_path() {
        let mut new = outer();
        new.plain[0].value = "y".to_string();
        assert_eq!(target(&new, &outer()).as_deref(), Some("plain[0].value"));
    }

    #[test]
    fn test_sequence_length_and_presence() {
        let mut longer = outer();
        longer.items.as_mut().unwrap().push(inner("extra"));
        assert_eq!(target(&longer, &outer()).as_deref(), Some("items"));

        let mut missing = outer();
        missing.items = None;
        assert_eq!(target(&missing, &outer()).as_deref(), Some("items"));

        let mut empty = outer();
        empty.items = Some(Vec::new());
        assert_eq!(target(&empty, &outer()).as_deref(), Some("items"));
    }

    #[test]
    fn test_optional_presence() {
        let mut new = outer();
        new.inner = None;
        assert_eq!(target(&new, &outer()).as_deref(), Some("inner"));

        let mut nested = outer();
        nested.inner.as_mut().unwrap().size = 9;
        assert_eq!(target(&nested, &outer()).as_deref(), Some("inner.size"));
    }

    #[test]
    fn test_read_only_omitted_is_accepted() {
        let mut new = outer();
        new.output = None;
        assert_eq!(target(&new, &outer()), None);
    }

    #[test]
    fn test_read_only_unchanged_is_accepted() {
        assert!(outer().output.is_some());
        assert_eq!(target(&outer(), &outer()), None);
    }

    #[test]
    fn test_read_only_change_targets_field() {
        let mut new = outer();
        new.output = Some(Inner::default());
        assert_eq!(target(&new, &outer()).as_deref(), Some("output"));

        let mut changed = outer();
        changed.output.as_mut().unwrap().size = 1;
        assert_eq!(target(&changed, &outer()).as_deref(), Some("output"));
    }

    #[test]
    fn test_primitive_kinds() {
        let mut new = outer();
        new.enabled = false;
        assert_eq!(target(&new, &outer()).as_deref(), Some("enabled"));

        let mut ratio = outer();
        ratio.ratio = 0.25;
        assert_eq!(target(&ratio, &outer()).as_deref(), Some("ratio"));
    }

    #[test]
    fn test_first_violation_wins() {
        let mut new = outer();
        new.region = "westus".to_string();
        new.enabled = false;
        assert_eq!(target(&new, &outer()).as_deref(), Some("region"));
    }

    #[test]
    fn test_path_prefix() {
        let mut new = outer();
        new.region = "westus".to_string();
        let err = validate("cluster", &new, &outer()).unwrap_err();
        assert_eq!(err.target, "cluster.region");
    }

    struct Shifty(bool);

    impl Walk for Shifty {
        fn walk(&self) -> Node<'_> {
            if self.0 {
                Node::Int(1)
            } else {
                Node::Str(Cow::Borrowed("1"))
            }
        }
    }

    #[test]
    #[should_panic(expected = "inconsistent Walk implementation")]
    fn test_inconsistent_model_panics() {
        let _ = validate("", &Shifty(true), &Shifty(false));
    }
}
