//! End-to-end flow: delimited text in, verbs over the table, feature class
//! out, and back again through the store's select.
use std::io::Write;

use avocet::prelude::*;

const CRIME_CSV: &str = "\
offense,neighborhood,count,rate
Burglary,Irvington,12,0.8
Theft,Lents,40,2.5
Assault,Irvington,4,0.3
Theft,Irvington,31,2.0
Burglary,Lents,8,0.6
Theft,Richmond,22,1.4
Assault,Lents,NA,0.2
Burglary,Richmond,5,0.4
";

fn read_crimes(dir: &std::path::Path) -> DataFrame {
    let csv_path = dir.join("crime_stats.csv");
    let mut file = std::fs::File::create(&csv_path).unwrap();
    file.write_all(CRIME_CSV.as_bytes()).unwrap();

    CsvReader::from_path(&csv_path)
        .unwrap()
        .infer_schema(Some(100))
        .has_header(true)
        .finish()
        .unwrap()
}

#[test]
fn csv_to_verbs_to_feature_class_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let df = read_crimes(dir.path());
    assert_eq!(df.shape(), (8, 4));
    assert_eq!(
        df.dtypes(),
        vec![
            DataType::Utf8,
            DataType::Utf8,
            DataType::Int64,
            DataType::Float64
        ]
    );

    // filter: drop the row with a missing count, keep the busy ones
    let mask = &df.column("count").unwrap().i64().unwrap().gt_eq(5)
        & &df.column("rate").unwrap().f64().unwrap().gt(0.3);
    let busy = df.filter(&mask).unwrap();
    assert_eq!(busy.height(), 6);

    // arrange: offense ascending, count descending within offense
    let ordered = busy
        .sort(&["offense", "count"], &[false, true])
        .unwrap();
    assert_eq!(
        ordered.column("offense").unwrap().get(0),
        AnyValue::Utf8("Burglary".into())
    );
    assert_eq!(ordered.column("count").unwrap().get(0), AnyValue::Int64(12));

    // summarize per group, in first-seen group order
    let per_offense = busy
        .group_by(&["offense"])
        .unwrap()
        .agg(&[("count", &[AggOp::Sum, AggOp::Mean])])
        .unwrap();
    assert_eq!(per_offense.shape(), (2, 3));
    assert_eq!(
        per_offense.column("count_sum").unwrap().get(0),
        AnyValue::Int64(25)
    );
    assert_eq!(
        per_offense.column("count_sum").unwrap().get(1),
        AnyValue::Int64(93)
    );

    // quantile ranking over the full table
    let mut quartile = df.column("count").unwrap().ntile(4).unwrap();
    quartile.rename("count_quartile");
    let mut ranked = df.clone();
    ranked.hstack(&[quartile]).unwrap();
    assert_eq!(
        ranked.column("count_quartile").unwrap().get(1),
        AnyValue::Int64(4)
    );
    assert_eq!(ranked.column("count_quartile").unwrap().get(6), AnyValue::Null);

    // persist as a feature class with one point per row
    let geometry: Vec<Option<Geometry>> = (0..ranked.height())
        .map(|i| Some(Geometry::Point([-122.6 - 0.01 * i as f64, 45.5])))
        .collect();
    let fc = FeatureCollection::new("crimes", ranked, geometry)
        .unwrap()
        .with_crs("EPSG:4326");

    let gdb_dir = dir.path().join("Portland_crime.gdb");
    std::fs::create_dir(&gdb_dir).unwrap();
    let gdb = GeoDatabase::open(&gdb_dir).unwrap();
    gdb.write("crimes", &fc).unwrap();
    assert_eq!(gdb.feature_classes().unwrap(), vec!["crimes"]);

    // source-side filter and projection
    let thefts = gdb
        .select(
            "crimes",
            Some(&["neighborhood", "count"]),
            Some("offense = 'Theft' AND count >= 22"),
        )
        .unwrap();
    assert_eq!(thefts.get_column_names(), vec!["neighborhood", "count"]);
    assert_eq!(thefts.height(), 3);
    assert_eq!(
        thefts.column("neighborhood").unwrap().get(0),
        AnyValue::Utf8("Lents".into())
    );

    // round trip preserved the attribute table
    let back = gdb.read("crimes").unwrap();
    assert!(back.table().frame_equal(fc.table()));
    assert_eq!(back.geometry().len(), fc.len());
    assert_eq!(back.crs(), Some("EPSG:4326"));
}

#[test]
fn pipe_chains_the_whole_flow() {
    let dir = tempfile::tempdir().unwrap();
    let df = read_crimes(dir.path());

    let summary = df
        .pipe(|df| {
            let mask = df.column("count").unwrap().i64().unwrap().gt(5);
            df.filter(&mask)
        })
        .unwrap()
        .pipe(|df| df.group_by(&["neighborhood"])?.select("rate").mean())
        .unwrap()
        .pipe(|df| df.sort(&["rate_mean"], &[true]))
        .unwrap();

    assert_eq!(summary.get_column_names(), vec!["neighborhood", "rate_mean"]);
    assert_eq!(
        summary.column("neighborhood").unwrap().get(0),
        AnyValue::Utf8("Lents".into())
    );
}
