//! Language elements: the vertices of the semantic graph
//!
//! Each element kind carries only its own attributes. Relationships such as
//! "the parameters of a method" or "the comments on a class" are answered by
//! containment queries on the [`GraphStore`](super::GraphStore), never by
//! links held inside the element.

use super::types::ElementId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a [`LanguageElement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Project,
    Library,
    Clazz,
    Method,
    Parameter,
    Comment,
}

impl ElementKind {
    /// Whether an element of this kind may be the container of `child`
    ///
    /// Project > Library > Clazz > Method > Parameter, and any element may
    /// hold comments.
    pub fn can_contain(&self, child: ElementKind) -> bool {
        matches!(
            (self, child),
            (_, ElementKind::Comment)
                | (ElementKind::Project, ElementKind::Library)
                | (ElementKind::Library, ElementKind::Clazz)
                | (ElementKind::Clazz, ElementKind::Method)
                | (ElementKind::Method, ElementKind::Parameter)
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Project => "Project",
            ElementKind::Library => "Library",
            ElementKind::Clazz => "Clazz",
            ElementKind::Method => "Method",
            ElementKind::Parameter => "Parameter",
            ElementKind::Comment => "Comment",
        };
        write!(f, "{}", name)
    }
}

/// The root of a program: a named, namespaced, licensed project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ElementId,
    pub name: String,
    pub namespace: String,
    pub copyright: String,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        copyright: impl Into<String>,
    ) -> Self {
        Project {
            id: ElementId::new(),
            name: name.into(),
            namespace: namespace.into(),
            copyright: copyright.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub id: ElementId,
    pub name: String,
}

impl Library {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ElementId::new(), name)
    }

    pub fn with_id(id: ElementId, name: impl Into<String>) -> Self {
        Library { id, name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clazz {
    pub id: ElementId,
    pub name: String,
}

impl Clazz {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ElementId::new(), name)
    }

    pub fn with_id(id: ElementId, name: impl Into<String>) -> Self {
        Clazz { id, name: name.into() }
    }
}

/// A method; names may be symbolic (`+`, `==`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub id: ElementId,
    pub name: String,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ElementId::new(), name)
    }

    pub fn with_id(id: ElementId, name: impl Into<String>) -> Self {
        Method { id, name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: ElementId,
    pub name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ElementId::new(), name)
    }

    pub fn with_id(id: ElementId, name: impl Into<String>) -> Self {
        Parameter { id, name: name.into() }
    }
}

/// Free-form annotation attached to any element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: ElementId,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment stamped with the current time
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self::with_timestamp(text, author, Utc::now())
    }

    pub fn with_timestamp(
        text: impl Into<String>,
        author: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Comment {
            id: ElementId::new(),
            text: text.into(),
            author: author.into(),
            created_at,
        }
    }
}

/// A vertex of the semantic graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum LanguageElement {
    Project(Project),
    Library(Library),
    Clazz(Clazz),
    Method(Method),
    Parameter(Parameter),
    Comment(Comment),
}

impl LanguageElement {
    pub fn id(&self) -> ElementId {
        match self {
            LanguageElement::Project(e) => e.id,
            LanguageElement::Library(e) => e.id,
            LanguageElement::Clazz(e) => e.id,
            LanguageElement::Method(e) => e.id,
            LanguageElement::Parameter(e) => e.id,
            LanguageElement::Comment(e) => e.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            LanguageElement::Project(_) => ElementKind::Project,
            LanguageElement::Library(_) => ElementKind::Library,
            LanguageElement::Clazz(_) => ElementKind::Clazz,
            LanguageElement::Method(_) => ElementKind::Method,
            LanguageElement::Parameter(_) => ElementKind::Parameter,
            LanguageElement::Comment(_) => ElementKind::Comment,
        }
    }

    /// Display name; comments are named by their text
    pub fn name(&self) -> &str {
        match self {
            LanguageElement::Project(e) => &e.name,
            LanguageElement::Library(e) => &e.name,
            LanguageElement::Clazz(e) => &e.name,
            LanguageElement::Method(e) => &e.name,
            LanguageElement::Parameter(e) => &e.name,
            LanguageElement::Comment(e) => &e.text,
        }
    }

    pub fn is_root(&self) -> bool {
        self.kind() == ElementKind::Project
    }
}

impl fmt::Display for LanguageElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} ({})", self.kind(), self.name(), self.id())
    }
}

impl From<Project> for LanguageElement {
    fn from(e: Project) -> Self {
        LanguageElement::Project(e)
    }
}

impl From<Library> for LanguageElement {
    fn from(e: Library) -> Self {
        LanguageElement::Library(e)
    }
}

impl From<Clazz> for LanguageElement {
    fn from(e: Clazz) -> Self {
        LanguageElement::Clazz(e)
    }
}

impl From<Method> for LanguageElement {
    fn from(e: Method) -> Self {
        LanguageElement::Method(e)
    }
}

impl From<Parameter> for LanguageElement {
    fn from(e: Parameter) -> Self {
        LanguageElement::Parameter(e)
    }
}

impl From<Comment> for LanguageElement {
    fn from(e: Comment) -> Self {
        LanguageElement::Comment(e)
    }
}
