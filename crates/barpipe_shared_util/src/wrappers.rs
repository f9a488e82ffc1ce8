use derive_more::{AsRef, Debug, Display, From, FromStr};
use serde::{Deserialize, Serialize};

/// The identifier of a producer service.
///
/// A service id is the filename stem shared by a producer's `.pid` and
/// `.block` files. Ids sort lexicographically, and that order is the display
/// order of the bar; producers that care about their position prepend a
/// numeric priority (`30clock` sorts before `90volume`).
#[repr(transparent)]
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, AsRef, From, FromStr, Display, Debug)]
#[debug("ServiceId({_0})")]
pub struct ServiceId(pub String);

impl ServiceId {
    /// Build a priority-prefixed id, the way ordering-sensitive producers
    /// register themselves.
    pub fn with_priority(priority: u32, name: &str) -> Self {
        ServiceId(format!("{}{}", priority, name))
    }
}

impl std::borrow::Borrow<str> for ServiceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServiceId {
    fn from(s: &str) -> Self {
        ServiceId(s.to_owned())
    }
}

#[cfg(test)]
mod test {
    use super::ServiceId;
    use pretty_assertions::assert_eq;

    #[test]
    fn priority_prefix_controls_ordering() {
        let clock = ServiceId::with_priority(30, "clock");
        let volume = ServiceId::with_priority(90, "volume");
        assert_eq!(clock.to_string(), "30clock");
        assert!(clock < volume);
    }

    #[test]
    fn plain_ids_sort_lexicographically() {
        let mut ids: Vec<ServiceId> = vec!["volume".into(), "clock".into(), "backup".into()];
        ids.sort();
        let ids: Vec<&str> = ids.iter().map(|id| id.0.as_str()).collect();
        assert_eq!(ids, vec!["backup", "clock", "volume"]);
    }
}
