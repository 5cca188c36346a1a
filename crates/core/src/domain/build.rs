use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::catalog::raw::null_as_default;
use crate::domain::component::{ComponentType, NormalizedComponent};

/// One slot of an assembled build. Missing or null fields decode to empty and zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specs: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wattage: u32,
}

impl From<&NormalizedComponent> for BuildEntry {
    fn from(component: &NormalizedComponent) -> Self {
        Self {
            name: component.name.clone(),
            price: component.price,
            specs: component.specs.clone(),
            wattage: component.wattage,
        }
    }
}

/// A possibly partial build keyed by category. Unresolved categories are simply absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AssembledBuild {
    entries: BTreeMap<ComponentType, BuildEntry>,
}

/// Null slots, unknown category keys and undecodable entries are dropped rather than failing
/// the whole build.
impl<'de> Deserialize<'de> for AssembledBuild {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let slots = BTreeMap::<String, Option<Value>>::deserialize(deserializer)?;

        Ok(slots
            .into_iter()
            .filter_map(|(key, slot)| {
                let kind = key.parse::<ComponentType>().ok()?;
                match BuildEntry::deserialize(slot?) {
                    Ok(entry) => Some((kind, entry)),
                    Err(error) => {
                        debug!(
                            event_name = "build.entry.skipped",
                            category = kind.as_str(),
                            error = %error,
                            "skipping undecodable build entry"
                        );
                        None
                    }
                }
            })
            .collect())
    }
}

impl AssembledBuild {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ComponentType, entry: BuildEntry) -> Option<BuildEntry> {
        self.entries.insert(kind, entry)
    }

    pub fn get(&self, kind: ComponentType) -> Option<&BuildEntry> {
        self.entries.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentType, &BuildEntry)> {
        self.entries.iter().map(|(kind, entry)| (*kind, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ComponentType, BuildEntry)> for AssembledBuild {
    fn from_iter<I: IntoIterator<Item = (ComponentType, BuildEntry)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::AssembledBuild;
    use crate::domain::component::ComponentType;

    #[test]
    fn sparse_entries_default_to_zero() {
        let build: AssembledBuild = serde_json::from_str(
            r#"{
                "cpu": { "name": "Ryzen 5 7600", "price": 11000, "wattage": 65 },
                "case": { "name": "NZXT H5 Flow" }
            }"#,
        )
        .expect("partial build should decode");

        assert_eq!(build.len(), 2);
        let case = build.get(ComponentType::Case).expect("case entry");
        assert_eq!(case.price, Decimal::ZERO);
        assert_eq!(case.wattage, 0);
        assert!(build.get(ComponentType::Gpu).is_none());
    }

    #[test]
    fn unresolved_and_unusable_slots_are_dropped() {
        let build: AssembledBuild = serde_json::from_str(
            r#"{
                "cpu": { "name": "Ryzen 5 7600", "price": 11000, "wattage": 65 },
                "gpu": null,
                "psu": { "name": null, "price": null, "wattage": 650 },
                "ram": { "price": 5509 },
                "storage": { "name": "Crucial P3", "price": "a lot" },
                "keyboard": { "name": "Mechanical", "price": 3000 }
            }"#,
        )
        .expect("partial build should decode");

        assert_eq!(build.len(), 3);
        assert!(build.get(ComponentType::Gpu).is_none());
        assert!(build.get(ComponentType::Storage).is_none());

        let psu = build.get(ComponentType::Psu).expect("psu entry");
        assert_eq!(psu.name, "");
        assert_eq!(psu.price, Decimal::ZERO);
        assert_eq!(psu.wattage, 650);

        let ram = build.get(ComponentType::Ram).expect("ram entry");
        assert_eq!(ram.price, Decimal::from(5_509));
        assert_eq!(ram.wattage, 0);
    }

    #[test]
    fn non_object_build_is_still_an_error() {
        assert!(serde_json::from_str::<AssembledBuild>("[1, 2]").is_err());
    }
}
