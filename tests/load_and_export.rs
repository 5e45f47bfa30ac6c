// tests/load_and_export.rs
use inspection_explorer::data::display::{to_display, DisplayTable};
use inspection_explorer::data::export::{aggregate_counts, to_csv_text, CategoryColumn, TOP_CUISINES};
use inspection_explorer::data::filter::{search, Criteria, FilterConfig};
use inspection_explorer::data::loader::load_from_reader;
use inspection_explorer::LoadError;

const EXPORT: &str = "\
CAMIS,DBA,BORO,BUILDING,STREET,ZIPCODE,PHONE,CUISINE DESCRIPTION,INSPECTION DATE,ACTION,VIOLATION CODE,VIOLATION DESCRIPTION,CRITICAL FLAG,SCORE,GRADE,GRADE DATE
1,JOE'S PIZZA,Manhattan,7,Carmine St,10014,2125550000,Pizza,01/01/2023,Cited,04L,\"Evidence of mice, live or dead\",Critical,12,A,01/01/2023
1,JOE'S PIZZA,Manhattan,7,Carmine St,10014,2125550000,Pizza,06/01/2023,Cited,10F,Non-food contact surface,Not Critical,9,A,06/01/2023
1,JOE'S PIZZA,Manhattan,7,Carmine St,10014,2125550000,Pizza,01/01/2024,Cited,,,Not Applicable,,A,
2,THAI HOUSE,Queens,40,Main St,11354,7185550000,Thai,01/01/1900,,,,,,,
3,THAI HOUSE,Queens,40,Main St,11354,7185550000,Thai,02/02/2024,Cited,02B,Hot food below 140 F,Critical,30,C,02/02/2024
4,,Bronx,1,Grand Concourse,10451,,Pizza,03/03/2024,Cited,,,Critical,5,A,
5,CORNER DELI,Bronx,1,Grand Concourse,10451.0,,American,bad date,Cited,,,Critical,5,A,
";

#[test]
fn export_is_cleaned_on_load() {
    let table = load_from_reader(EXPORT.as_bytes()).unwrap();
    // The ungraded 1900 row, the nameless row and the bad date are gone.
    assert_eq!(table.len(), 4);
    for rec in table.records() {
        assert!(!rec.restaurant_name.is_empty());
        assert!(!rec.grade.is_empty());
    }
    assert_eq!(table.cuisines(), ["Pizza", "Thai"]);
    assert_eq!(table.grades(), ["A", "C"]);
    assert!(table
        .records()
        .iter()
        .all(|r| r.restaurant_name == "Joe'S Pizza" || r.restaurant_name == "Thai House"));
}

#[test]
fn search_display_and_csv_pipeline() {
    let table = load_from_reader(EXPORT.as_bytes()).unwrap();
    let rows = search(
        &table,
        &Criteria::default().with_name("JOE").with_zip_code("10014"),
        &FilterConfig::default(),
    )
    .unwrap();
    assert_eq!(rows.len(), 3);

    let display = to_display(&rows);
    let csv = String::from_utf8(to_csv_text(&display).unwrap()).unwrap();
    let expected = "\
Restaurant Name,Borough,Inspection Date,Grade,Score,Critical Issue,Violation Details
Joe'S Pizza,Manhattan,2024-01-01,A,,Not Applicable,
Joe'S Pizza,Manhattan,2023-06-01,A,9,Not Critical,Non-food contact surface
Joe'S Pizza,Manhattan,2023-01-01,A,12,Critical,\"Evidence of mice, live or dead\"
";
    assert_eq!(csv, expected);

    // Reading the download back yields the same table.
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    let body: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    assert_eq!(DisplayTable { headers, rows: body }, display);
}

#[test]
fn chart_counts_from_loaded_table() {
    let table = load_from_reader(EXPORT.as_bytes()).unwrap();
    let cuisines = aggregate_counts(table.records(), CategoryColumn::Cuisine, Some(TOP_CUISINES));
    assert_eq!(
        cuisines,
        vec![("Pizza".to_string(), 3), ("Thai".to_string(), 1)]
    );
    let boroughs = aggregate_counts(table.records(), CategoryColumn::Borough, None);
    assert_eq!(
        boroughs,
        vec![("Manhattan".to_string(), 3), ("Queens".to_string(), 1)]
    );
}

#[test]
fn renamed_upstream_column_fails_the_load() {
    let renamed = EXPORT.replacen("CUISINE DESCRIPTION", "CUISINE", 1);
    match load_from_reader(renamed.as_bytes()) {
        Err(LoadError::MissingColumn { column }) => assert_eq!(column, "CUISINE DESCRIPTION"),
        other => panic!("expected a schema error, got {other:?}"),
    }
}
