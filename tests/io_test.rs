use std::fs;
use std::io::Write;

use candyprep::io::read_candy_csv;
use candyprep::processor::CandyProcessor;

const SAMPLE_CSV: &str = "\
competitorname,chocolate,fruity,caramel,peanutyalmondy,nougat,crispedricewafer,hard,bar,pluribus,sugarpercent,pricepercent,winpercent
100 Grand,1,0,1,0,0,1,0,1,0,0.732,0.860,66.971725
3 Musketeers,1,0,0,0,1,0,0,1,0,0.604,0.511,67.602936
One dime,0,0,0,0,0,0,0,0,0,0.011,0.116,32.261086
";

#[test]
fn test_read_candy_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("candy.csv");
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

    let table = read_candy_csv(&path).unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.column_count(), 13);
    assert_eq!(table.column_names()[0], "competitorname");
    assert_eq!(table.column_names()[12], "winpercent");

    let names = table
        .column("competitorname")
        .unwrap()
        .as_string()
        .unwrap();
    assert_eq!(names.get(1), Some("3 Musketeers"));

    let chocolate = table.column("chocolate").unwrap().as_int64().unwrap();
    assert_eq!(chocolate.values(), &[1, 1, 0]);

    let win = table.column("winpercent").unwrap().as_float64().unwrap();
    assert!((win.get(2).unwrap() - 32.261086).abs() < 1e-9);
}

#[test]
fn test_processor_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("candy.csv");
    fs::write(&path, SAMPLE_CSV).unwrap();

    let processor = CandyProcessor::from_csv(&path, 0.3).unwrap();
    assert!(processor.table().has_column("desirability"));
    assert_eq!(processor.table().row_count(), 3);

    // Least popular row normalizes to 0, most popular to 1
    let win_norm = processor
        .table()
        .column("winpercent_norm")
        .unwrap()
        .as_float64()
        .unwrap();
    assert!((win_norm.get(2).unwrap() - 0.0).abs() < 1e-12);
    assert!((win_norm.get(1).unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn test_read_missing_file_is_io_error() {
    let err = read_candy_csv("/nonexistent/candy.csv").unwrap_err();
    assert!(matches!(err, candyprep::Error::Io(_)));
}
