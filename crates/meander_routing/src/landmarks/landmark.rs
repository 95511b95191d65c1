use serde::Serialize;

use crate::{geopoint::GeoPoint, types::LandmarkId};

/// A point of interest shown to walkers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Landmark {
    id: LandmarkId,
    name: String,
    description: String,
    kind: Option<String>,
    coordinates: GeoPoint,
}

impl Landmark {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: Option<String>,
        coordinates: GeoPoint,
    ) -> Self {
        Landmark {
            id: 0,
            name: name.into(),
            description: description.into(),
            kind,
            coordinates,
        }
    }

    /// Position in the owning [`LandmarkIndex`](super::landmark_index::LandmarkIndex).
    pub fn id(&self) -> LandmarkId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: LandmarkId) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn coordinates(&self) -> &GeoPoint {
        &self.coordinates
    }

    /// Keys under which a requested landmark concept resolves to this landmark.
    pub(crate) fn lookup_keys(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(normalize_key(&self.name)).chain(self.kind.as_deref().map(normalize_key))
    }
}

pub(crate) fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}
