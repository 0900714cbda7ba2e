use quake_core::dataset::{AffectedArea, AreaDamage, DamageLevel, SettlementKind};
use quake_core::export::{export_data, to_csv, CSV_HEADER};
use quake_core::{Coordinate, Dataset, ExportFormat, ExportOutcome};
use chrono::Utc;
use tempfile::TempDir;

fn town(name: &str, lat: f64, lng: f64) -> AffectedArea {
    AffectedArea {
        name: name.to_string(),
        location: Coordinate::new(lat, lng),
        population: 100,
        damage: AreaDamage {
            level: DamageLevel::Light,
            buildings_damaged: 1,
            injured: 0,
            power_outage: false,
            description: "x".to_string(),
        },
        kind: SettlementKind::Town,
    }
}

#[test]
fn test_csv_single_row_exact() {
    let csv = to_csv(&[town("Town A", 10.0, 20.0)]).unwrap();
    assert_eq!(
        csv,
        "Location,Latitude,Longitude,Population,Damage Level,Buildings Damaged,Injured\n\"Town A\",10,20,100,\"light\",1,0\n"
    );
}

#[test]
fn test_csv_without_areas_is_header_only() {
    assert_eq!(to_csv(&[]).unwrap(), format!("{}\n", CSV_HEADER));
}

#[test]
fn test_csv_quotes_embedded_commas() {
    let csv = to_csv(&[town("Ust-Kamchatsk, port", 56.2, 162.5)]).unwrap();
    assert!(csv.ends_with("\"Ust-Kamchatsk, port\",56.2,162.5,100,\"light\",1,0\n"));
}

#[test]
fn test_csv_quotes_numeric_looking_text() {
    let mut area = town("1905", 10.0, 20.0);
    let csv = to_csv(&[area.clone()]).unwrap();
    assert!(csv.ends_with("\n\"1905\",10,20,100,\"light\",1,0\n"));

    area.name = "inf".to_string();
    area.damage.level = DamageLevel::from("3");
    let csv = to_csv(&[area]).unwrap();
    assert!(csv.ends_with("\n\"inf\",10,20,100,\"3\",1,0\n"));
}

#[test]
fn test_csv_doubles_embedded_quotes() {
    let csv = to_csv(&[town("The \"Old\" Port", 10.0, 20.0)]).unwrap();
    assert!(csv.ends_with("\n\"The \"\"Old\"\" Port\",10,20,100,\"light\",1,0\n"));
}

#[test]
fn test_kamchatka_csv_has_row_per_area() {
    let data = Dataset::kamchatka();
    let csv = to_csv(&data.affected_areas).unwrap();
    assert_eq!(csv.lines().count(), 1 + data.affected_areas.len());
    assert!(csv.contains("\"Petropavlovsk-Kamchatsky\",53.0446,158.65,179000,\"moderate\",23,8"));
}

#[test]
fn test_json_export_reloads_as_dataset() {
    let data = Dataset::kamchatka();
    let ExportOutcome::Download(file) = export_data(&data, ExportFormat::Json, Utc::now()).unwrap()
    else {
        panic!("json export should download");
    };

    let dir = TempDir::new().unwrap();
    let path = file.write_into(dir.path()).unwrap();
    assert!(path.ends_with("kamchatka_earthquake_data.json"));

    let reloaded = Dataset::load(&path).unwrap();
    assert_eq!(reloaded, data);
}

#[test]
fn test_pdf_never_produces_a_file() {
    let outcome = export_data(&Dataset::kamchatka(), ExportFormat::Pdf, Utc::now()).unwrap();
    assert!(matches!(outcome, ExportOutcome::Unsupported { .. }));
}
