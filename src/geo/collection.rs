//! A tabular dataset with one geometry per row.
use crate::datatypes::{BooleanArray, Schema};
use crate::error::{AvocetError, Result};
use crate::frame::DataFrame;
use crate::geo::Geometry;

/// An attribute table with a geometry column and an optional CRS label.
/// Invariant: there is exactly one (possibly null) geometry per table row.
#[derive(Clone)]
pub struct FeatureCollection {
    name: String,
    crs: Option<String>,
    table: DataFrame,
    geometry: Vec<Option<Geometry>>,
}

impl FeatureCollection {
    pub fn new(name: &str, table: DataFrame, geometry: Vec<Option<Geometry>>) -> Result<Self> {
        if geometry.len() != table.height() {
            return Err(AvocetError::ShapeMismatch(
                format!(
                    "{} geometries for an attribute table of height {}",
                    geometry.len(),
                    table.height()
                )
                .into(),
            ));
        }
        Ok(FeatureCollection {
            name: name.to_string(),
            crs: None,
            table,
            geometry,
        })
    }

    pub fn with_crs(mut self, crs: &str) -> Self {
        self.crs = Some(crs.to_string());
        self
    }

    pub(crate) fn set_crs(&mut self, crs: Option<String>) {
        self.crs = crs;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn crs(&self) -> Option<&str> {
        self.crs.as_deref()
    }

    /// The attribute table.
    pub fn table(&self) -> &DataFrame {
        &self.table
    }

    pub fn geometry(&self) -> &[Option<Geometry>] {
        &self.geometry
    }

    pub fn len(&self) -> usize {
        self.table.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn schema(&self) -> Schema {
        self.table.schema()
    }

    /// Keep the features where `mask` is true; attributes and geometry move
    /// in lockstep.
    pub fn filter(&self, mask: &BooleanArray) -> Result<Self> {
        let table = self.table.filter(mask)?;
        let geometry = self
            .geometry
            .iter()
            .zip(mask.iter())
            .filter(|(_, keep)| matches!(keep, Some(true)))
            .map(|(g, _)| g.clone())
            .collect();
        Ok(FeatureCollection {
            name: self.name.clone(),
            crs: self.crs.clone(),
            table,
            geometry,
        })
    }

    /// Discard the geometry column and keep the attribute table.
    pub fn into_table(self) -> DataFrame {
        self.table
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    fn collection() -> FeatureCollection {
        let table = df! {
            "name" => ["park", "school"],
            "acres" => [12.5, 3.0]
        }
        .unwrap();
        let geometry = vec![
            Some(Geometry::Point([0.0, 0.0])),
            Some(Geometry::Point([1.0, 1.0])),
        ];
        FeatureCollection::new("places", table, geometry)
            .unwrap()
            .with_crs("EPSG:4326")
    }

    #[test]
    fn geometry_count_must_match_height() {
        let table = df! { "a" => [1, 2] }.unwrap();
        assert!(FeatureCollection::new("x", table, vec![None]).is_err());
    }

    #[test]
    fn filter_moves_geometry_in_lockstep() {
        let fc = collection();
        let mask = fc.table().column("acres").unwrap().f64().unwrap().gt(10.0);
        let out = fc.filter(&mask).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.geometry()[0], Some(Geometry::Point([0.0, 0.0])));
        assert_eq!(out.crs(), Some("EPSG:4326"));
    }
}
