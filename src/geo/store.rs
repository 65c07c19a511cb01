//! The file-backed feature-class store.
//!
//! A geodatabase is a directory; every feature class inside it is one
//! `<name>.geojson` document (a GeoJSON `FeatureCollection` whose feature
//! `properties` carry the attribute table).
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::datatypes::{AnyValue, DataType};
use crate::error::{AvocetError, Result};
use crate::frame::DataFrame;
use crate::geo::{FeatureCollection, Geometry, Predicate};
use crate::series::Series;

const EXTENSION: &str = "geojson";

/// A handle to a directory of feature classes.
pub struct GeoDatabase {
    root: PathBuf,
}

#[derive(Serialize, Deserialize)]
struct FeatureCollectionDoc {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    crs: Option<String>,
    features: Vec<FeatureDoc>,
}

#[derive(Serialize, Deserialize)]
struct FeatureDoc {
    #[serde(rename = "type")]
    kind: String,
    geometry: Option<Geometry>,
    properties: Map<String, Value>,
}

impl GeoDatabase {
    /// Open a geodatabase. The path must name an existing directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(AvocetError::InvalidPath(root.display().to_string()));
        }
        debug!(root = %root.display(), "opened geodatabase");
        Ok(GeoDatabase { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    fn class_path(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AvocetError::InvalidPath(format!(
                "feature class name {:?} must be alphanumeric with '_' or '-'",
                name
            )));
        }
        Ok(self.root.join(format!("{}.{}", name, EXTENSION)))
    }

    /// List the names of the stored feature classes.
    pub fn feature_classes(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Read a feature class into memory.
    pub fn read(&self, name: &str) -> Result<FeatureCollection> {
        let path = self.class_path(name)?;
        if !path.is_file() {
            return Err(AvocetError::FeatureClassNotFound(name.to_string()));
        }
        let doc: FeatureCollectionDoc = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        if doc.kind != "FeatureCollection" {
            return Err(AvocetError::SchemaMismatch(
                format!("{} is not a FeatureCollection document", name).into(),
            ));
        }
        if let Some(feature) = doc.features.iter().find(|f| f.kind != "Feature") {
            return Err(AvocetError::SchemaMismatch(
                format!("unexpected {:?} object in feature class {}", feature.kind, name).into(),
            ));
        }
        let table = columns_from_features(&doc.features)?;
        let geometry = doc.features.iter().map(|f| f.geometry.clone()).collect();
        let mut collection = FeatureCollection::new(name, table, geometry)?;
        collection.set_crs(doc.crs);
        debug!(class = name, rows = collection.len(), "read feature class");
        Ok(collection)
    }

    /// Read a feature class as a plain table, filtered and projected at the
    /// source. The filter runs before the projection, so the where clause may
    /// reference columns that are not kept.
    pub fn select(
        &self,
        name: &str,
        fields: Option<&[&str]>,
        where_clause: Option<&str>,
    ) -> Result<DataFrame> {
        let df = self.read(name)?.into_table();
        let df = match where_clause {
            Some(clause) => {
                let predicate = Predicate::parse(clause)?;
                df.filter(&predicate.mask(&df)?)?
            }
            None => df,
        };
        match fields {
            Some(fields) => df.select(fields),
            None => Ok(df),
        }
    }

    /// Persist a feature class. A target that already exists is replaced
    /// when its attribute schema matches and rejected otherwise.
    pub fn write(&self, name: &str, collection: &FeatureCollection) -> Result<()> {
        let path = self.class_path(name)?;
        if path.is_file() {
            let existing = self.read(name)?;
            if existing.schema() != collection.schema() {
                return Err(AvocetError::SchemaMismatch(
                    format!(
                        "feature class {} already exists with schema [{}], refusing to write [{}]",
                        name,
                        schema_description(&existing),
                        schema_description(collection),
                    )
                    .into(),
                ));
            }
        }
        let table = collection.table();
        let mut features = Vec::with_capacity(collection.len());
        for row in 0..collection.len() {
            let mut properties = Map::new();
            for series in table.get_columns() {
                properties.insert(series.name().to_string(), any_to_json(series.get(row)));
            }
            features.push(FeatureDoc {
                kind: "Feature".to_string(),
                geometry: collection.geometry()[row].clone(),
                properties,
            });
        }
        let doc = FeatureCollectionDoc {
            kind: "FeatureCollection".to_string(),
            name: name.to_string(),
            crs: collection.crs().map(str::to_string),
            features,
        };
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &doc)?;
        writer.flush()?;
        debug!(class = name, rows = collection.len(), "wrote feature class");
        Ok(())
    }
}

fn schema_description(collection: &FeatureCollection) -> String {
    collection
        .schema()
        .fields()
        .iter()
        .map(|f| format!("{} ({})", f.name(), f.dtype()))
        .join(", ")
}

// Rebuild the attribute table from feature properties: column order is
// first-seen order, dtypes are unified across features.
fn columns_from_features(features: &[FeatureDoc]) -> Result<DataFrame> {
    let mut names: Vec<String> = Vec::new();
    for feature in features {
        for key in feature.properties.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }
    let mut columns = Vec::with_capacity(names.len());
    for name in &names {
        let mut values = Vec::with_capacity(features.len());
        for feature in features {
            values.push(json_to_any(name, feature.properties.get(name))?);
        }
        let dtype = unify_dtype(name, &values)?;
        columns.push(Series::from_any_values(name, dtype, &values)?);
    }
    DataFrame::new(columns)
}

fn json_to_any(column: &str, value: Option<&Value>) -> Result<AnyValue> {
    let any = match value {
        None | Some(Value::Null) => AnyValue::Null,
        Some(Value::Bool(b)) => AnyValue::Boolean(*b),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                AnyValue::Int64(i)
            } else if let Some(f) = n.as_f64() {
                AnyValue::Float64(f)
            } else {
                return Err(AvocetError::DataTypeMismatch(
                    format!("number {} in column {} exceeds the supported range", n, column).into(),
                ));
            }
        }
        Some(Value::String(s)) => AnyValue::Utf8(s.clone()),
        Some(other) => {
            return Err(AvocetError::DataTypeMismatch(
                format!("unsupported property value {} in column {}", other, column).into(),
            ))
        }
    };
    Ok(any)
}

// All-integral stays Int64, mixed numerics promote to Float64, anything else
// must agree on one dtype. All-null columns come out Utf8.
fn unify_dtype(column: &str, values: &[AnyValue]) -> Result<DataType> {
    let mut unified: Option<DataType> = None;
    for value in values {
        let Some(dtype) = value.dtype() else { continue };
        unified = Some(match unified {
            None => dtype,
            Some(current) if current == dtype => current,
            Some(current) if current.is_numeric() && dtype.is_numeric() => DataType::Float64,
            Some(current) => {
                return Err(AvocetError::DataTypeMismatch(
                    format!(
                        "column {} mixes {} and {} values",
                        column, current, dtype
                    )
                    .into(),
                ))
            }
        });
    }
    Ok(unified.unwrap_or(DataType::Utf8))
}

fn any_to_json(value: AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int64(i) => Value::Number(i.into()),
        // non-finite floats have no JSON representation and store as null
        AnyValue::Float64(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AnyValue::Utf8(s) => Value::String(s),
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    fn sample_collection() -> FeatureCollection {
        let table = df! {
            "offense" => ["Burglary", "Theft", "Assault"],
            "count" => [Some(12), Some(40), None],
            "rate" => [0.8, 2.5, 0.3]
        }
        .unwrap();
        let geometry = vec![
            Some(Geometry::Point([-122.65, 45.52])),
            Some(Geometry::Point([-122.61, 45.50])),
            None,
        ];
        FeatureCollection::new("crimes", table, geometry)
            .unwrap()
            .with_crs("EPSG:4326")
    }

    #[test]
    fn open_rejects_missing_directory() {
        assert!(matches!(
            GeoDatabase::open("/definitely/not/a/real/dir"),
            Err(AvocetError::InvalidPath(_))
        ));
    }

    #[test]
    fn write_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let gdb = GeoDatabase::open(dir.path()).unwrap();
        let fc = sample_collection();
        gdb.write("crimes", &fc).unwrap();

        assert_eq!(gdb.feature_classes().unwrap(), vec!["crimes"]);

        let back = gdb.read("crimes").unwrap();
        assert_eq!(back.crs(), Some("EPSG:4326"));
        assert!(back.table().frame_equal(fc.table()));
        assert_eq!(back.geometry(), fc.geometry());
    }

    #[test]
    fn select_filters_then_projects() {
        let dir = tempfile::tempdir().unwrap();
        let gdb = GeoDatabase::open(dir.path()).unwrap();
        gdb.write("crimes", &sample_collection()).unwrap();

        let df = gdb
            .select("crimes", Some(&["offense"]), Some("rate > 0.5"))
            .unwrap();
        assert_eq!(df.get_column_names(), vec!["offense"]);
        assert_eq!(df.height(), 2);
        assert_eq!(
            df.column("offense").unwrap().get(1),
            AnyValue::Utf8("Theft".into())
        );

        let all = gdb.select("crimes", None, None).unwrap();
        assert_eq!(all.shape(), (3, 3));
    }

    #[test]
    fn write_to_existing_requires_matching_schema() {
        let dir = tempfile::tempdir().unwrap();
        let gdb = GeoDatabase::open(dir.path()).unwrap();
        gdb.write("crimes", &sample_collection()).unwrap();

        // same schema replaces
        gdb.write("crimes", &sample_collection()).unwrap();

        let other = FeatureCollection::new(
            "other",
            df! { "totally" => ["different"] }.unwrap(),
            vec![None],
        )
        .unwrap();
        assert!(matches!(
            gdb.write("crimes", &other),
            Err(AvocetError::SchemaMismatch(_))
        ));
        // a fresh name is fine
        gdb.write("other", &other).unwrap();
    }

    #[test]
    fn missing_class_and_bad_names_error() {
        let dir = tempfile::tempdir().unwrap();
        let gdb = GeoDatabase::open(dir.path()).unwrap();
        assert!(matches!(
            gdb.read("nope"),
            Err(AvocetError::FeatureClassNotFound(_))
        ));
        assert!(matches!(
            gdb.read("../escape"),
            Err(AvocetError::InvalidPath(_))
        ));
    }

    #[test]
    fn mixed_numeric_properties_promote_to_float() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.geojson");
        std::fs::write(
            &path,
            r#"{
                "type": "FeatureCollection",
                "name": "mixed",
                "features": [
                    {"type": "Feature", "geometry": null, "properties": {"v": 1}},
                    {"type": "Feature", "geometry": null, "properties": {"v": 2.5}}
                ]
            }"#,
        )
        .unwrap();
        let gdb = GeoDatabase::open(dir.path()).unwrap();
        let fc = gdb.read("mixed").unwrap();
        assert_eq!(fc.table().dtypes(), vec![DataType::Float64]);
        assert_eq!(
            fc.table().column("v").unwrap().get(0),
            AnyValue::Float64(1.0)
        );
    }
}
