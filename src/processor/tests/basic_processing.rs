//! Basic processing pipeline tests

use crate::config::{FilterPolicy, RunConfig};
use crate::models::{InputLayout, SoundingHeader, SoundingLevel, SoundingTable};
use crate::processor::{SoundingProcessor, is_shallow};
use crate::processor::derivation::dewpoint_from_rh;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to write a fixture file and return its path
fn write_fixture(temp_dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn imet_header() -> SoundingHeader {
    SoundingHeader::from_parameters(Some("UAH"), "160324", "1515").unwrap()
}

/// Data lines between `%RAW%` and `%END%`
fn data_lines(text: &str) -> Vec<&str> {
    text.lines()
        .skip_while(|line| *line != "%RAW%")
        .skip(1)
        .take_while(|line| *line != "%END%")
        .collect()
}

#[test]
fn test_imet_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(
        &temp_dir,
        "759_001.log",
        "20.0 0.0 50.0 1000.0 200.0 0.0 0.0 0.0 5.0\n\
         15.0 0.0 60.0 900.0 1000.0 0.0 0.0 3.141592653589793 10.0\n\
         -40.0 0.0 20.0 300.0 9000.0 0.0 0.0 6.283185307179586 40.0\n",
    );

    let config = RunConfig::new(&input, InputLayout::UahImet, imet_header())
        .with_output_dir(temp_dir.path());
    let stats = SoundingProcessor::new(config).process().unwrap();

    assert_eq!(stats.levels_read, 3);
    assert_eq!(stats.levels_written, 3);
    assert_eq!(stats.levels_non_ascending, 0);
    assert_eq!(stats.ceiling_index, None);
    assert_eq!(stats.output_path, temp_dir.path().join("1603241515_UAH_SHARPpy"));

    let text = fs::read_to_string(&stats.output_path).unwrap();
    assert!(text.starts_with("%TITLE%\nUAH 160324/1515\n\n"));
    assert!(text.ends_with("%END%\n"));

    let lines = data_lines(&text);
    assert_eq!(lines.len(), 3);

    let td = dewpoint_from_rh(20.0, 50.0, 1000.0);
    assert_eq!(lines[0], format!("1000.0, 200.0, 20.0, {:?}, 0.0, 5.0", td));

    // pi radians -> 180 degrees, 2 pi radians -> exactly 360 -> 0
    let fields: Vec<&str> = lines[1].split(", ").collect();
    assert_eq!(fields[4], "180.0");
    let fields: Vec<&str> = lines[2].split(", ").collect();
    assert_eq!(fields[4], "0.0");
}

#[test]
fn test_wyoming_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(
        &temp_dir,
        "2016-03-13_1901.csv",
        "PRES,HGHT,TEMP,DWPT,RELH,MIXR,DRCT,SKNT\n\
         1000.0,178,21.2,12.2,56,9.0,170,8\n\
         925.0,850,17.0,10.0,63,8.4,360,20\n\
         850.0,1550,12.6,3.6,54,5.8,375,25\n\
         700.0,3140,2.0,-9.0,44,2.8,250,30\n",
    );

    let header = SoundingHeader::from_filename(Some("BMX"), &input).unwrap();
    let config =
        RunConfig::new(&input, InputLayout::Wyoming, header).with_output_dir(temp_dir.path());
    let stats = SoundingProcessor::new(config).process().unwrap();

    assert_eq!(stats.levels_written, 4);
    assert_eq!(stats.non_finite_dewpoints, 0);
    assert_eq!(stats.output_path, temp_dir.path().join("1603131901_SHARPpy"));

    let text = fs::read_to_string(&stats.output_path).unwrap();
    assert_eq!(
        text,
        "%TITLE%\n\
         BMX 160313/1901\n\
         \n\
         LEVEL  HGHT  TEMP  DWPT WDIR  WSPD\n\
         ----------------------------------\n\
         %RAW%\n\
         1000.0, 178.0, 21.2, 12.2, 170.0, 8.0\n\
         925.0, 850.0, 17.0, 10.0, 0.0, 20.0\n\
         850.0, 1550.0, 12.6, 3.6, 15.0, 25.0\n\
         700.0, 3140.0, 2.0, -9.0, 250.0, 30.0\n\
         %END%\n"
    );
}

#[test]
fn test_ceiling_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(
        &temp_dir,
        "2016-03-13_1901.csv",
        "PRES,HGHT,TEMP,DWPT,RELH,MIXR,DRCT,SKNT\n\
         950,500,20,10,50,7,180,10\n\
         900,600,18,9,50,7,180,10\n\
         850,700,16,8,50,7,180,10\n\
         99,800,-60,-70,10,0,180,50\n\
         800,900,14,7,50,7,180,10\n",
    );

    let header = SoundingHeader::from_filename(None, &input).unwrap();
    let config =
        RunConfig::new(&input, InputLayout::Wyoming, header).with_output_dir(temp_dir.path());
    let stats = SoundingProcessor::new(config).process().unwrap();

    assert_eq!(stats.levels_read, 5);
    assert_eq!(stats.levels_written, 3);
    assert_eq!(stats.ceiling_index, Some(3));

    let text = fs::read_to_string(&stats.output_path).unwrap();
    assert!(text.starts_with("%TITLE%\nMSU 160313/1901\n"));
    assert!(text.ends_with("%END%\n"));
    let pressures: Vec<&str> = data_lines(&text)
        .into_iter()
        .map(|line| line.split(", ").next().unwrap())
        .collect();
    assert_eq!(pressures, vec!["950.0", "900.0", "850.0"]);
}

#[test]
fn test_plateau_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(
        &temp_dir,
        "2016-03-13_1901.csv",
        "PRES,HGHT,TEMP,DWPT,RELH,MIXR,DRCT,SKNT\n\
         950,500,20,10,50,7,180,10\n\
         940,600,19,9,50,7,180,10\n\
         930,600,18,9,50,7,180,10\n\
         920,700,17,8,50,7,180,10\n",
    );

    let header = SoundingHeader::from_filename(Some("BMX"), &input).unwrap();
    let config =
        RunConfig::new(&input, InputLayout::Wyoming, header).with_output_dir(temp_dir.path());
    let stats = SoundingProcessor::new(config).process().unwrap();

    assert_eq!(stats.levels_written, 3);
    assert_eq!(stats.levels_non_ascending, 1);

    let text = fs::read_to_string(&stats.output_path).unwrap();
    let lines = data_lines(&text);
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| !line.starts_with("930.0")));
}

#[test]
fn test_missing_values_propagate_as_sentinel() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(
        &temp_dir,
        "2016-03-13_1901.csv",
        "PRES,HGHT,TEMP,DWPT,RELH,MIXR,DRCT,SKNT\n\
         950,500,20,-----,50,7,180,10\n\
         900,600,18,9,50,7,-----,10\n",
    );

    let header = SoundingHeader::from_filename(Some("BMX"), &input).unwrap();
    let config =
        RunConfig::new(&input, InputLayout::Wyoming, header).with_output_dir(temp_dir.path());
    let stats = SoundingProcessor::new(config).process().unwrap();

    assert_eq!(stats.sentinel_levels, 2);
    assert_eq!(stats.levels_written, 2);

    let text = fs::read_to_string(&stats.output_path).unwrap();
    let lines = data_lines(&text);
    assert_eq!(lines[0], "950.0, 500.0, 20.0, -9999.0, 180.0, 10.0");
    assert_eq!(lines[1], "900.0, 600.0, 18.0, 9.0, -9999.0, 10.0");
}

#[test]
fn test_non_finite_dewpoint_is_written() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(
        &temp_dir,
        "759_001.log",
        "20.0 0.0 0.0 1000.0 200.0 0.0 0.0 0.0 5.0\n",
    );

    let config = RunConfig::new(&input, InputLayout::UahImet, imet_header())
        .with_output_dir(temp_dir.path());
    let stats = SoundingProcessor::new(config).process().unwrap();

    assert_eq!(stats.non_finite_dewpoints, 1);
    let text = fs::read_to_string(&stats.output_path).unwrap();
    assert_eq!(data_lines(&text), vec!["1000.0, 200.0, 20.0, nan, 0.0, 5.0"]);
}

#[test]
fn test_shallow_sounding_still_converts() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(
        &temp_dir,
        "759_001.log",
        "20.0 0.0 50.0 1000.0 200.0 0.0 0.0 0.0 5.0\n\
         18.0 0.0 50.0 950.0 650.0 0.0 0.0 0.0 5.0\n",
    );

    let config = RunConfig::new(&input, InputLayout::UahImet, imet_header())
        .with_output_dir(temp_dir.path());
    let stats = SoundingProcessor::new(config).process().unwrap();

    assert_eq!(stats.levels_written, 2);
    assert!(stats.shallow);
    assert!(stats.output_path.exists());
}

fn table_ending_at(pressures: &[f64]) -> SoundingTable {
    SoundingTable::new(
        pressures
            .iter()
            .enumerate()
            .map(|(i, &pressure_mb)| SoundingLevel {
                pressure_mb,
                height_m: 100.0 * (i + 1) as f64,
                temp_c: 10.0,
                dewpoint_c: Some(0.0),
                rel_humidity_pct: None,
                wind_dir: 0.0,
                wind_speed_kt: 0.0,
            })
            .collect(),
    )
}

#[test]
fn test_shallow_boundary_on_last_level() {
    let policy = FilterPolicy::default();

    assert!(is_shallow(&table_ending_at(&[1000.0, 400.0]), &policy));
    assert!(!is_shallow(&table_ending_at(&[1000.0, 399.9]), &policy));
    assert!(!is_shallow(&SoundingTable::default(), &policy));

    // Only the last input row counts, even if an earlier one went higher
    assert!(is_shallow(&table_ending_at(&[1000.0, 300.0, 450.0]), &policy));
}

#[test]
fn test_deep_sounding_not_flagged() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(
        &temp_dir,
        "759_002.log",
        "20.0 0.0 50.0 1000.0 200.0 0.0 0.0 0.0 5.0\n\
         -10.0 0.0 50.0 399.9 7000.0 0.0 0.0 0.0 25.0\n",
    );

    let config = RunConfig::new(&input, InputLayout::UahImet, imet_header())
        .with_output_dir(temp_dir.path());
    let stats = SoundingProcessor::new(config).process().unwrap();

    assert!(!stats.shallow);
    assert_eq!(stats.levels_written, 2);
}
