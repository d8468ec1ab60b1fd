use std::process;

use scrcmd_xlsx::conf::derive_default_workbook_options;
use scrcmd_xlsx::generate_workbook;

fn main() {
    let options = derive_default_workbook_options();

    match generate_workbook(&options) {
        Ok(report) => {
            for sheet in &report.sheets {
                for c_warning in &sheet.warnings {
                    eprintln!("warning: [{}] {c_warning}", sheet.sheet_name);
                }
            }
            println!("Excel generated: {}", report.path_file_out.display());
        }
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}
