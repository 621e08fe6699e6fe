//! Path resolution over records, lists and entities.
//!
//! A [`Path`] is a single key (possibly a dotted string such as
//! `"owner.address.city"`), an explicit list of segments, or a resolver
//! closure. Resolution is total except for two cases: entity properties
//! that are missing on an entity which does not tolerate missing keys, and
//! case-insensitive key checks against an entity.

use std::fmt;
use std::sync::Arc;

use recordkit_value::{ContainerError, ContainerKind, Key, KeyedContainer, Value};
use tracing::trace;

use crate::error::{ComposeError, ComposeResult};

/// A closure resolving a value from a container and the caller's default.
pub type Resolver = Arc<dyn Fn(&dyn KeyedContainer, Value) -> Value + Send + Sync>;

/// Where to find a value inside a container.
#[derive(Clone)]
pub enum Path {
    /// A single key. Text keys containing `.` fall back to nested lookup.
    Key(Key),
    /// Explicit segments, resolved left to right.
    Segments(Vec<Key>),
    /// A resolver closure; its result is returned as is.
    Resolver(Resolver),
}

impl Path {
    /// Wraps a closure as a path.
    pub fn resolver<F>(f: F) -> Self
    where
        F: Fn(&dyn KeyedContainer, Value) -> Value + Send + Sync + 'static,
    {
        Self::Resolver(Arc::new(f))
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Self::Segments(segments) => f.debug_tuple("Segments").field(segments).finish(),
            Self::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

impl From<Key> for Path {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

impl From<&str> for Path {
    fn from(key: &str) -> Self {
        Self::Key(Key::from(key))
    }
}

impl From<String> for Path {
    fn from(key: String) -> Self {
        Self::Key(Key::from(key))
    }
}

impl From<i64> for Path {
    fn from(key: i64) -> Self {
        Self::Key(Key::Int(key))
    }
}

impl<K: Into<Key>> From<Vec<K>> for Path {
    fn from(segments: Vec<K>) -> Self {
        Self::Segments(segments.into_iter().map(Into::into).collect())
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

/// Resolves `path` against `container`, returning `default` when nothing is
/// found.
///
/// # Resolution order
///
/// 1. A resolver closure is called with `(container, default)`.
/// 2. Segments are resolved left to right, each result becoming the next
///    container; the last segment is looked up in the final container.
/// 3. A key present in the container is returned, even if its value is null.
/// 4. A text key containing `.` is split at the *last* dot: the prefix is
///    resolved recursively, then the suffix is read from the result.
/// 5. Entities are asked for the property directly. A missing property is
///    an error unless the entity declares optional keys or offset access.
///
/// # Errors
///
/// Returns [`ComposeError::PropertyAccess`] when an entity without
/// optional-key or offset-access capability lacks the property.
///
/// # Example
///
/// ```
/// use recordkit_core::get_value;
/// use recordkit_value::{Record, Value};
///
/// let inner = Record::from([("c", 9)]);
/// let middle = Record::from([("b", inner)]);
/// let outer = Record::from([("a", middle)]);
///
/// assert_eq!(get_value(&outer, "a.b.c", Value::Null).unwrap(), Value::Integer(9));
/// assert_eq!(get_value(&outer, "x.y", "default").unwrap(), Value::from("default"));
/// ```
pub fn get_value(
    container: &dyn KeyedContainer,
    path: impl Into<Path>,
    default: impl Into<Value>,
) -> ComposeResult<Value> {
    resolve(container, &path.into(), default.into())
}

pub(crate) fn resolve(
    container: &dyn KeyedContainer,
    path: &Path,
    default: Value,
) -> ComposeResult<Value> {
    match path {
        Path::Resolver(resolver) => Ok(resolver(container, default)),
        Path::Key(key) => resolve_key(container, key, default),
        Path::Segments(segments) => {
            let Some((last, init)) = segments.split_last() else {
                return Ok(default);
            };
            let mut current: Option<Value> = None;
            for segment in init {
                let next = match &current {
                    Some(value) => resolve_key(value, segment, default.clone())?,
                    None => resolve_key(container, segment, default.clone())?,
                };
                current = Some(next);
            }
            match &current {
                Some(value) => resolve_key(value, last, default),
                None => resolve_key(container, last, default),
            }
        }
    }
}

fn resolve_key(container: &dyn KeyedContainer, key: &Key, default: Value) -> ComposeResult<Value> {
    if container.has_key(key) {
        return Ok(container.get(key)?);
    }

    if let Key::Str(name) = key {
        if let Some((prefix, suffix)) = name.rsplit_once('.') {
            trace!(prefix, suffix, "resolving dotted key through its prefix");
            let parent = resolve_key(container, &Key::from(prefix), default.clone())?;
            return read_direct(&parent, &Key::from(suffix), default);
        }
    }

    read_direct(container, key, default)
}

fn read_direct(container: &dyn KeyedContainer, key: &Key, default: Value) -> ComposeResult<Value> {
    if container.has_key(key) {
        return Ok(container.get(key)?);
    }
    if container.kind() != ContainerKind::Entity {
        return Ok(default);
    }

    match container.get(key) {
        Ok(value) => Ok(value),
        Err(_) if container.capabilities().tolerates_missing() => Ok(default),
        Err(ContainerError::NotFound { .. }) => Err(ComposeError::property_access(
            container.type_name(),
            key.to_string(),
        )),
        Err(err) => Err(err.into()),
    }
}

/// Checks whether `key` is present in `container`.
///
/// Case-sensitive checks report presence even for null values. The
/// case-insensitive mode compares case-folded keys and needs an enumerable
/// container.
///
/// # Errors
///
/// Returns [`ComposeError::InvalidArgument`] for a case-insensitive check
/// against an entity or any other container that cannot list its keys.
pub fn key_exists(
    container: &dyn KeyedContainer,
    key: impl Into<Key>,
    case_sensitive: bool,
) -> ComposeResult<bool> {
    let key = key.into();
    if case_sensitive {
        return Ok(container.has_key(&key));
    }

    let keys = match container.kind() {
        ContainerKind::Entity => None,
        _ => container.keys(),
    };
    let Some(keys) = keys else {
        return Err(ComposeError::invalid_argument(format!(
            "case-insensitive key lookup is not supported on {}",
            container.type_name()
        )));
    };

    let wanted = key.to_string().to_lowercase();
    Ok(keys.iter().any(|k| k.to_string().to_lowercase() == wanted))
}
