//! Series store: the ordered points of the current experiment run.

use std::sync::Arc;

use crate::circuit::Topology;

use super::measurement::MeasurementPoint;

/// Append-only, ordered collection of recorded points.
///
/// Mutation is crate-private so only the experiment can append or clear.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    points: Vec<MeasurementPoint>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, point: MeasurementPoint) {
        self.points.push(point);
    }

    pub(crate) fn clear(&mut self) {
        self.points.clear();
    }

    /// All points in recording order
    pub fn all(&self) -> &[MeasurementPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recently recorded point
    pub fn last(&self) -> Option<&MeasurementPoint> {
        self.points.last()
    }

    /// Whether any recorded point used exactly this voltage
    pub fn contains_voltage(&self, voltage_v: f64) -> bool {
        self.points.iter().any(|p| p.voltage_v() == voltage_v)
    }

    /// Immutable copy for exporters; later appends do not affect it.
    pub fn snapshot(&self, topology: Topology) -> SeriesSnapshot {
        SeriesSnapshot {
            topology,
            points: Arc::from(self.points.as_slice()),
        }
    }
}

/// Frozen view of a series taken at export time.
#[derive(Debug, Clone)]
pub struct SeriesSnapshot {
    topology: Topology,
    points: Arc<[MeasurementPoint]>,
}

impl SeriesSnapshot {
    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn points(&self) -> &[MeasurementPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::ResistancePair;

    fn point(voltage_v: f64) -> MeasurementPoint {
        MeasurementPoint::derive(Topology::Series, ResistancePair::new(10.0, 10.0), voltage_v)
    }

    #[test]
    fn test_append_keeps_order() {
        let mut store = SeriesStore::new();
        store.append(point(1.0));
        store.append(point(3.0));
        store.append(point(2.0));

        let voltages: Vec<f64> = store.all().iter().map(|p| p.voltage_v()).collect();
        assert_eq!(voltages, vec![1.0, 3.0, 2.0]);
        assert_eq!(store.last().map(|p| p.voltage_v()), Some(2.0));
        assert!(store.contains_voltage(3.0));
        assert!(!store.contains_voltage(4.0));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = SeriesStore::new();
        store.append(point(1.0));
        let snapshot = store.snapshot(Topology::Series);

        store.append(point(2.0));
        store.clear();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.points()[0].voltage_v(), 1.0);
        assert!(store.is_empty());
    }
}
