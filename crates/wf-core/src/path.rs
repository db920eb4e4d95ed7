//! Path-to-master encoding.
//!
//! A path is the ordered chain of sensor ids from the master junction down to
//! a node, ending in the node's own id. On the wire it is rendered as the ids
//! joined by [`PATH_DELIMITER`], e.g. `1000->1003->1042`.
//!
//! Ancestry tests always compare whole segments. `1000->1003` does not
//! contain `100` even though the rendered string does.

use core::fmt;
use core::str::FromStr;

use crate::error::WfError;
use crate::ids::SensorId;

/// Separator between path segments in the rendered form.
pub const PATH_DELIMITER: &str = "->";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SensorPath(Vec<SensorId>);

impl SensorPath {
    /// Path of a root node.
    pub fn root(id: SensorId) -> Self {
        Self(vec![id])
    }

    /// Path of a child of `self`.
    pub fn child(&self, id: SensorId) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(id);
        Self(segments)
    }

    pub fn segments(&self) -> &[SensorId] {
        &self.0
    }

    /// Number of segments; 1 for the master.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The node this path leads to.
    pub fn leaf(&self) -> SensorId {
        // constructors never produce an empty path
        self.0[self.0.len() - 1]
    }

    /// Id of the direct parent, `None` for a root path.
    pub fn parent(&self) -> Option<SensorId> {
        let n = self.0.len();
        if n >= 2 { Some(self.0[n - 2]) } else { None }
    }

    /// Exact segment membership.
    pub fn contains(&self, id: SensorId) -> bool {
        self.0.contains(&id)
    }

    /// True if `ancestor` appears on this path before the leaf.
    pub fn descends_from(&self, ancestor: SensorId) -> bool {
        self.0[..self.0.len() - 1].contains(&ancestor)
    }
}

impl fmt::Display for SensorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(PATH_DELIMITER)?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

impl FromStr for SensorPath {
    type Err = WfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason| WfError::MalformedPath {
            path: s.to_string(),
            reason,
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(malformed("empty path"));
        }

        let mut segments = Vec::new();
        for raw in trimmed.split(PATH_DELIMITER) {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(malformed("empty segment"));
            }
            let id: u32 = raw.parse().map_err(|_| malformed("non-integer segment"))?;
            segments.push(SensorId(id));
        }
        Ok(Self(segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn renders_with_delimiter() {
        let path = SensorPath::root(SensorId(1000))
            .child(SensorId(1003))
            .child(SensorId(1042));
        assert_eq!(path.to_string(), "1000->1003->1042");
        assert_eq!(path.leaf(), SensorId(1042));
        assert_eq!(path.parent(), Some(SensorId(1003)));
        assert_eq!(path.depth(), 3);
    }

    #[test]
    fn root_has_no_parent() {
        let path = SensorPath::root(SensorId(7));
        assert_eq!(path.parent(), None);
        assert!(!path.descends_from(SensorId(7)));
        assert!(path.contains(SensorId(7)));
    }

    #[test]
    fn parses_with_surrounding_whitespace() {
        let path: SensorPath = " 1000 -> 1001 ".parse().unwrap();
        assert_eq!(path.segments(), &[SensorId(1000), SensorId(1001)]);
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in ["", "   ", "1000->", "->1000", "1000->->1001", "1000->abc", "-5"] {
            let err = bad.parse::<SensorPath>().unwrap_err();
            assert!(
                matches!(err, WfError::MalformedPath { .. }),
                "expected malformed path for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn segment_match_is_exact() {
        let path: SensorPath = "1000->100".parse().unwrap();
        assert!(path.contains(SensorId(100)));
        assert!(!path.contains(SensorId(10)));
        assert!(!path.contains(SensorId(1)));
        assert!(!path.contains(SensorId(1001)));
    }

    proptest! {
        #[test]
        fn contains_agrees_with_segments(ids in prop::collection::vec(0_u32..5000, 1..6), probe in 0_u32..5000) {
            let mut iter = ids.iter();
            let mut path = SensorPath::root(SensorId(*iter.next().unwrap()));
            for id in iter {
                path = path.child(SensorId(*id));
            }
            let reparsed: SensorPath = path.to_string().parse().unwrap();
            prop_assert_eq!(&reparsed, &path);
            prop_assert_eq!(path.contains(SensorId(probe)), ids.contains(&probe));
        }
    }
}
