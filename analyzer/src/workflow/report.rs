use gwcore::FitReport;

/// Human-readable summary of the omega fit.
pub fn format_report(report: &FitReport) -> String {
    format!(
        "The extremum of the quadratic curve occurs at t = {:.15} with omega = {:.15} . implied omega(t=0) = {:.15}",
        report.extremum_time, report.extremum_omega, report.omega_at_zero
    )
}
