mod change_report;

pub use change_report::ChangeReport;
