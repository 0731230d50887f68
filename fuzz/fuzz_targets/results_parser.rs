#![no_main]

use benchmatrix::config::AnalysisConfig;
use benchmatrix::report::{Report, ReportOptions};
use benchmatrix::results::ResultsTable;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing and a lenient analysis must never panic, whatever the input
        if let Ok(table) = ResultsTable::from_toml_str(input) {
            let config = AnalysisConfig {
                keep_going: true,
                ..AnalysisConfig::default()
            };
            if let Ok(plan) = config.resolve(&table) {
                let _ = Report::build(&table, &plan, ReportOptions::default());
            }
        }
    }
});
