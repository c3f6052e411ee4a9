use std::{
    collections::BTreeMap,
    fmt,
    hash::{Hash, Hasher},
};

use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::{
    metadata::{
        constants::{Constant, DexStringRc},
        typesystem::DexTypeRc,
    },
    Error, Result,
};

/// Raw visibility encodings as stored in annotation items
#[allow(non_snake_case)]
pub mod VISIBILITY {
    /// Retained in the artifact but hidden from reflection
    pub const INVISIBLE: u8 = 0x00;
    /// Observable through reflection at runtime
    pub const VISIBLE: u8 = 0x01;
    /// Produced and consumed by the toolchain itself
    pub const SYSTEM: u8 = 0x02;
}

/// How an annotation may be observed once it is part of a compiled artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum Visibility {
    /// Retained in the artifact but hidden from reflection
    Invisible,
    /// Observable through reflection at runtime
    Visible,
    /// Produced and consumed by the toolchain itself, never surfaced to user code
    System,
}

impl Visibility {
    /// Returns the container encoding byte for this visibility
    #[must_use]
    pub fn encoding(&self) -> u8 {
        match self {
            Visibility::Invisible => VISIBILITY::INVISIBLE,
            Visibility::Visible => VISIBILITY::VISIBLE,
            Visibility::System => VISIBILITY::SYSTEM,
        }
    }

    /// Resolves a container encoding byte back to its visibility
    #[must_use]
    pub fn from_encoding(byte: u8) -> Option<Visibility> {
        Visibility::iter().find(|visibility| visibility.encoding() == byte)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Invisible => f.write_str("invisible"),
            Visibility::Visible => f.write_str("visible"),
            Visibility::System => f.write_str("system"),
        }
    }
}

/// One named value inside an annotation.
///
/// Elements are immutable pairs; changing a value means replacing the whole element
/// through [`Annotation::put`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationElement {
    /// The element name, unique within its annotation
    name: DexStringRc,
    /// The element value
    value: Constant,
}

impl AnnotationElement {
    /// Creates a new element pairing `name` with `value`
    #[must_use]
    pub fn new(name: DexStringRc, value: Constant) -> Self {
        AnnotationElement { name, value }
    }

    /// Returns the element name
    #[must_use]
    pub fn name(&self) -> &DexStringRc {
        &self.name
    }

    /// Returns the element value
    #[must_use]
    pub fn value(&self) -> &Constant {
        &self.value
    }
}

impl fmt::Display for AnnotationElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name.as_str(), self.value)
    }
}

/// A single annotation: a kind, a visibility and an ordered list of named elements.
///
/// Annotations follow a freeze-once lifecycle. They are created mutable, populated through
/// [`add`](Annotation::add) or [`put`](Annotation::put), then frozen permanently with
/// [`set_immutable`](Annotation::set_immutable). Element insertion order is preserved, and
/// element names are unique within one annotation.
///
/// Equality and hashing cover kind, visibility and elements; the lifecycle state never
/// affects comparison.
///
/// # Examples
///
/// ```rust
/// use dexscope::metadata::{
///     annotations::{Annotation, AnnotationElement, Visibility},
///     constants::Constant,
///     pool::InternPool,
/// };
///
/// let pool = InternPool::new();
/// let mut annotation = Annotation::new(
///     pool.intern_type("Lcom/example/Marker;")?,
///     Visibility::Visible,
/// );
/// annotation.add(AnnotationElement::new(
///     pool.intern_string("value"),
///     Constant::Integer(7),
/// ))?;
/// annotation.set_immutable();
///
/// assert_eq!(
///     format!("{}", annotation),
///     "visible-annotation Lcom/example/Marker; {value: 7}"
/// );
/// # Ok::<(), dexscope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Annotation {
    /// The annotation kind, an interned class type
    kind: DexTypeRc,
    /// How the annotation is observable downstream
    visibility: Visibility,
    /// The named values, in insertion order
    elements: Vec<AnnotationElement>,
    /// False once the annotation has been frozen
    mutable: bool,
}

impl Annotation {
    /// Creates a new, empty, mutable annotation of the given kind and visibility
    #[must_use]
    pub fn new(kind: DexTypeRc, visibility: Visibility) -> Self {
        Annotation {
            kind,
            visibility,
            elements: Vec::new(),
            mutable: true,
        }
    }

    /// Returns the annotation kind
    #[must_use]
    pub fn kind(&self) -> &DexTypeRc {
        &self.kind
    }

    /// Returns the annotation visibility
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns the elements in insertion order
    #[must_use]
    pub fn elements(&self) -> &[AnnotationElement] {
        &self.elements
    }

    /// Returns the element named `name`, if present
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnnotationElement> {
        self.elements
            .iter()
            .find(|element| element.name().as_str() == name)
    }

    /// Appends an element whose name is not present yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Immutable`] if the annotation has been frozen,
    /// [`Error::Mutable`] if the element value embeds a still-mutable container, or
    /// [`Error::DuplicateElement`] if an element with the same name already exists.
    pub fn add(&mut self, element: AnnotationElement) -> Result<()> {
        if !self.mutable {
            return Err(Error::Immutable);
        }
        element.value().require_immutable()?;
        if self.get(element.name().as_str()).is_some() {
            return Err(Error::DuplicateElement(element.name().as_str().to_string()));
        }

        self.elements.push(element);
        Ok(())
    }

    /// Sets an element, replacing an existing element of the same name in place.
    ///
    /// A replaced element keeps its position in the insertion order; a new name is
    /// appended at the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Immutable`] if the annotation has been frozen, or
    /// [`Error::Mutable`] if the element value embeds a still-mutable container.
    pub fn put(&mut self, element: AnnotationElement) -> Result<()> {
        if !self.mutable {
            return Err(Error::Immutable);
        }
        element.value().require_immutable()?;

        match self
            .elements
            .iter_mut()
            .find(|existing| existing.name() == element.name())
        {
            Some(existing) => *existing = element,
            None => self.elements.push(element),
        }
        Ok(())
    }

    /// Freezes the annotation, rejecting every later mutation
    pub fn set_immutable(&mut self) {
        self.mutable = false;
    }

    /// True while the annotation still accepts elements
    #[must_use]
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.visibility == other.visibility
            && self.elements == other.elements
    }
}

impl Eq for Annotation {}

impl Hash for Annotation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.visibility.hash(state);
        self.elements.hash(state);
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-annotation {} {{",
            self.visibility,
            self.kind.descriptor().as_str()
        )?;
        for (index, element) in self.elements.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str("}")
    }
}

/// The set of annotations attached to one class, field or method.
///
/// At most one annotation per kind; iteration yields annotations in ascending kind order.
/// The set follows the same freeze-once lifecycle as [`Annotation`], and only frozen
/// annotations may be inserted.
#[derive(Debug, Clone)]
pub struct Annotations {
    /// The annotations, keyed by kind
    annotations: BTreeMap<DexTypeRc, Annotation>,
    /// False once the set has been frozen
    mutable: bool,
}

impl Annotations {
    /// Creates a new, empty, mutable set
    #[must_use]
    pub fn new() -> Self {
        Annotations {
            annotations: BTreeMap::new(),
            mutable: true,
        }
    }

    /// Inserts an annotation whose kind is not present yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Immutable`] if the set has been frozen, [`Error::Mutable`] if
    /// `annotation` is itself still mutable, or [`Error::DuplicateAnnotation`] if an
    /// annotation of the same kind already exists.
    pub fn add(&mut self, annotation: Annotation) -> Result<()> {
        if !self.mutable {
            return Err(Error::Immutable);
        }
        if annotation.is_mutable() {
            return Err(Error::Mutable);
        }
        if self.annotations.contains_key(annotation.kind()) {
            return Err(Error::DuplicateAnnotation(
                annotation.kind().descriptor().as_str().to_string(),
            ));
        }

        self.annotations.insert(annotation.kind().clone(), annotation);
        Ok(())
    }

    /// Inserts an annotation, replacing an existing annotation of the same kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Immutable`] if the set has been frozen, or [`Error::Mutable`] if
    /// `annotation` is itself still mutable.
    pub fn put(&mut self, annotation: Annotation) -> Result<()> {
        if !self.mutable {
            return Err(Error::Immutable);
        }
        if annotation.is_mutable() {
            return Err(Error::Mutable);
        }

        self.annotations.insert(annotation.kind().clone(), annotation);
        Ok(())
    }

    /// Returns the annotation of the given kind, if present
    #[must_use]
    pub fn get(&self, kind: &DexTypeRc) -> Option<&Annotation> {
        self.annotations.get(kind)
    }

    /// Iterates the annotations in ascending kind order
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.values()
    }

    /// Returns the number of annotations
    #[must_use]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// True if the set holds no annotations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Freezes the set, rejecting every later insertion
    pub fn set_immutable(&mut self) {
        self.mutable = false;
    }

    /// True while the set still accepts annotations
    #[must_use]
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }
}

impl Default for Annotations {
    fn default() -> Self {
        Annotations::new()
    }
}

impl PartialEq for Annotations {
    fn eq(&self, other: &Self) -> bool {
        self.annotations == other.annotations
    }
}

impl Eq for Annotations {}

impl fmt::Display for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("annotations{")?;
        for (index, annotation) in self.annotations.values().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{annotation}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{constants::ConstArray, pool::InternPool};

    fn marker(pool: &InternPool) -> Annotation {
        Annotation::new(
            pool.intern_type("Lcom/example/Marker;").unwrap(),
            Visibility::Visible,
        )
    }

    #[test]
    fn test_visibility_encodings() {
        assert_eq!(Visibility::Invisible.encoding(), 0x00);
        assert_eq!(Visibility::Visible.encoding(), 0x01);
        assert_eq!(Visibility::System.encoding(), 0x02);

        for visibility in Visibility::iter() {
            assert_eq!(
                Visibility::from_encoding(visibility.encoding()),
                Some(visibility)
            );
        }
        assert_eq!(Visibility::from_encoding(0x03), None);
        assert_eq!(Visibility::COUNT, 3);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let pool = InternPool::new();
        let mut annotation = marker(&pool);

        for name in ["c", "a", "b"] {
            annotation
                .add(AnnotationElement::new(
                    pool.intern_string(name),
                    Constant::Integer(0),
                ))
                .unwrap();
        }
        annotation.set_immutable();

        let order: Vec<&str> = annotation
            .elements()
            .iter()
            .map(|element| element.name().as_str())
            .collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_add_rejects_duplicate_name() {
        let pool = InternPool::new();
        let mut annotation = marker(&pool);

        annotation
            .add(AnnotationElement::new(
                pool.intern_string("value"),
                Constant::Integer(1),
            ))
            .unwrap();
        let duplicate = annotation.add(AnnotationElement::new(
            pool.intern_string("value"),
            Constant::Integer(2),
        ));

        assert!(matches!(duplicate, Err(Error::DuplicateElement(name)) if name == "value"));
        assert_eq!(annotation.elements().len(), 1);
    }

    #[test]
    fn test_put_replaces_in_place() {
        let pool = InternPool::new();
        let mut annotation = marker(&pool);

        annotation
            .add(AnnotationElement::new(
                pool.intern_string("first"),
                Constant::Integer(1),
            ))
            .unwrap();
        annotation
            .add(AnnotationElement::new(
                pool.intern_string("second"),
                Constant::Integer(2),
            ))
            .unwrap();
        annotation
            .put(AnnotationElement::new(
                pool.intern_string("first"),
                Constant::Integer(10),
            ))
            .unwrap();

        // Replacement keeps the original position
        assert_eq!(annotation.elements()[0].name().as_str(), "first");
        assert_eq!(annotation.elements()[0].value(), &Constant::Integer(10));
        assert_eq!(annotation.elements().len(), 2);

        annotation
            .put(AnnotationElement::new(
                pool.intern_string("third"),
                Constant::Integer(3),
            ))
            .unwrap();
        assert_eq!(annotation.elements()[2].name().as_str(), "third");
    }

    #[test]
    fn test_mutation_after_freeze_fails() {
        let pool = InternPool::new();
        let mut annotation = marker(&pool);
        annotation.set_immutable();

        assert!(!annotation.is_mutable());
        for result in [
            annotation.add(AnnotationElement::new(
                pool.intern_string("value"),
                Constant::Null,
            )),
            annotation.put(AnnotationElement::new(
                pool.intern_string("value"),
                Constant::Null,
            )),
        ] {
            assert!(matches!(result, Err(Error::Immutable)));
        }
    }

    #[test]
    fn test_add_rejects_mutable_value() {
        let pool = InternPool::new();
        let mut annotation = marker(&pool);

        let open_array = ConstArray::new();
        let result = annotation.add(AnnotationElement::new(
            pool.intern_string("value"),
            Constant::Array(open_array),
        ));
        assert!(matches!(result, Err(Error::Mutable)));

        let nested = marker(&pool);
        let result = annotation.add(AnnotationElement::new(
            pool.intern_string("nested"),
            Constant::Annotation(nested),
        ));
        assert!(matches!(result, Err(Error::Mutable)));
    }

    #[test]
    fn test_get_by_name() {
        let pool = InternPool::new();
        let mut annotation = marker(&pool);
        annotation
            .add(AnnotationElement::new(
                pool.intern_string("value"),
                Constant::Integer(4),
            ))
            .unwrap();
        annotation.set_immutable();

        assert_eq!(
            annotation.get("value").map(AnnotationElement::value),
            Some(&Constant::Integer(4))
        );
        assert!(annotation.get("missing").is_none());
    }

    #[test]
    fn test_equality_ignores_lifecycle_state() {
        let pool = InternPool::new();
        let mut frozen = marker(&pool);
        frozen.set_immutable();
        let open = marker(&pool);

        assert_eq!(frozen, open);
    }

    #[test]
    fn test_annotations_unique_by_kind() {
        let pool = InternPool::new();
        let mut set = Annotations::new();

        let mut first = marker(&pool);
        first.set_immutable();
        set.add(first).unwrap();

        let mut again = marker(&pool);
        again.set_immutable();
        let duplicate = set.add(again);
        assert!(matches!(
            duplicate,
            Err(Error::DuplicateAnnotation(kind)) if kind == "Lcom/example/Marker;"
        ));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_annotations_require_frozen_entries() {
        let pool = InternPool::new();
        let mut set = Annotations::new();

        assert!(matches!(set.add(marker(&pool)), Err(Error::Mutable)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_annotations_iterate_in_kind_order() {
        let pool = InternPool::new();
        let mut set = Annotations::new();

        for descriptor in ["Lb/B;", "La/A;", "Lc/C;"] {
            let mut annotation = Annotation::new(
                pool.intern_type(descriptor).unwrap(),
                Visibility::Invisible,
            );
            annotation.set_immutable();
            set.add(annotation).unwrap();
        }
        set.set_immutable();

        let order: Vec<&str> = set
            .iter()
            .map(|annotation| annotation.kind().descriptor().as_str())
            .collect();
        assert_eq!(order, vec!["La/A;", "Lb/B;", "Lc/C;"]);

        assert!(matches!(
            set.put(marker(&pool)),
            Err(Error::Immutable | Error::Mutable)
        ));
    }

    #[test]
    fn test_annotations_put_replaces() {
        let pool = InternPool::new();
        let mut set = Annotations::new();

        let mut first = marker(&pool);
        first.set_immutable();
        set.add(first).unwrap();

        let mut replacement = marker(&pool);
        replacement
            .add(AnnotationElement::new(
                pool.intern_string("value"),
                Constant::Integer(1),
            ))
            .unwrap();
        replacement.set_immutable();
        set.put(replacement).unwrap();

        let kind = pool.intern_type("Lcom/example/Marker;").unwrap();
        assert_eq!(set.get(&kind).unwrap().elements().len(), 1);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_display() {
        let pool = InternPool::new();
        let mut annotation = marker(&pool);
        annotation
            .add(AnnotationElement::new(
                pool.intern_string("name"),
                Constant::String(pool.intern_string("Outer")),
            ))
            .unwrap();
        annotation
            .add(AnnotationElement::new(
                pool.intern_string("accessFlags"),
                Constant::Integer(8),
            ))
            .unwrap();
        annotation.set_immutable();

        assert_eq!(
            format!("{}", annotation),
            "visible-annotation Lcom/example/Marker; {name: \"Outer\", accessFlags: 8}"
        );
    }
}
