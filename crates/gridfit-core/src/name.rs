use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Interner shared by every area parse. Labels are never released.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Label of the empty cell in a named-area grid.
pub const EMPTY_CELL: &str = ".";

/// An interned named-area label (`header`, `main`, `.`).
/// A 4-byte `Spur`; equality and hashing never touch the strings.
///
/// Every distinct label stays in a process-wide interner until exit, so
/// memory grows with the number of distinct labels ever parsed. Hosts that
/// parse untrusted area text in a long-lived process should bound the label
/// vocabulary (or the input size) before calling [`crate::parse_areas`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AreaName(Spur);

impl AreaName {
    /// Intern a label, or return the existing handle if already interned.
    pub fn intern(s: &str) -> Self {
        AreaName(INTERNER.get_or_intern(s))
    }

    /// The label of the empty cell (`.`).
    pub fn empty() -> Self {
        Self::intern(EMPTY_CELL)
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// `true` for the `.` placeholder, which never names an area.
    pub fn is_empty_cell(&self) -> bool {
        self.as_str() == EMPTY_CELL
    }
}

// Ordered by label text, not interning order, so sets iterate alphabetically.
impl PartialOrd for AreaName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AreaName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Debug for AreaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for AreaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for AreaName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for AreaName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AreaName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(AreaName::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = AreaName::intern("header");
        let b = AreaName::intern("header");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "header");
    }

    #[test]
    fn interned_labels_are_retained() {
        let label = "retained-after-last-handle-drops";
        assert!(!INTERNER.contains(label));
        let key = AreaName::intern(label).0;
        assert_eq!(INTERNER.get(label), Some(key));
    }

    #[test]
    fn empty_cell_is_recognised() {
        assert!(AreaName::empty().is_empty_cell());
        assert!(!AreaName::intern("main").is_empty_cell());
    }

    #[test]
    fn ordering_follows_label_text() {
        // Intern in reverse order so interning order disagrees with text order.
        let z = AreaName::intern("zz_sidebar");
        let a = AreaName::intern("aa_header");
        assert!(a < z);
    }
}
