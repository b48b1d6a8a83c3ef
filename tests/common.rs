// Shared setup for CLI tests: an isolated HOME with optional rc file and input files

use assert_cmd::Command;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const GRID_CSV: &str = "\
Generation MW,Transmission Line,Substation ID,Distribution Zone,Consumer Name,Notes
500,HV-1,SUB-01,Z-North,Acme Homes,ok
450,HV-2,SUB-02,Z-South,Bright Flats,
300,HV-3,SUB-03,Z-East,Cedar Farm,check
";

pub struct TestEnv {
    pub temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self { temp_dir: TempDir::new().unwrap() }
    }

    /// Write `~/.powertier/rc`
    pub fn with_rc(self, content: &str) -> Self {
        let config_dir = self.temp_dir.path().join(".powertier");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("rc"), content).unwrap();
        self
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Workbook with an incomplete "Summary" sheet first and a complete "Grid" second
    #[allow(dead_code)]
    pub fn write_workbook(&self, name: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut workbook = Workbook::new();

        let summary = workbook.add_worksheet();
        summary.set_name("Summary").unwrap();
        summary.write_string(0, 0, "Region").unwrap();
        summary.write_string(1, 0, "North").unwrap();

        let grid = workbook.add_worksheet();
        grid.set_name("Grid").unwrap();
        for (row, line) in GRID_CSV.lines().enumerate() {
            for (col, cell) in line.split(',').enumerate() {
                match cell.parse::<f64>() {
                    Ok(number) => grid.write_number(row as u32, col as u16, number).unwrap(),
                    Err(_) => grid.write_string(row as u32, col as u16, cell).unwrap(),
                };
            }
        }

        workbook.save(&path).unwrap();
        path
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("powertier").unwrap();
        cmd.env("HOME", self.temp_dir.path());
        cmd.env_remove("RUST_LOG");
        cmd
    }
}
