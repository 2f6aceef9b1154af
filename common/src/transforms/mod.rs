pub mod csv;
pub mod share;

pub use csv::*;
pub use share::*;

/// Toggle rendering shared by the export and share formats.
pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
